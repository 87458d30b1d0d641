// =============================================================================
// Storedesk Web - WASM Entry Point
// =============================================================================
// Trunk compiles this and injects it into index.html.
// =============================================================================

use storedesk_web::App;

fn main() {
    console_error_panic_hook::set_once();

    // ignore if already initialized through `mount`
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Starting Storedesk Web...");

    leptos::mount::mount_to_body(App);
}
