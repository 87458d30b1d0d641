// =============================================================================
// Storedesk Web - Form Components
// =============================================================================
// Table of Contents:
// 1. TextInput
// 2. Select
// =============================================================================

use leptos::prelude::*;

// -----------------------------------------------------------------------------
// 1. TextInput
// -----------------------------------------------------------------------------

/// Text input field with label.
#[component]
pub fn TextInput(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional, into)] input_type: String,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let input_type = if input_type.is_empty() { "text".to_string() } else { input_type };

    view! {
        <div class="form-field">
            <label class="form-label">
                {label}
                {required.then(|| view! { <span class="required">"*"</span> })}
            </label>
            <input
                type=input_type
                class="form-input"
                placeholder=placeholder
                required=required
                prop:value=move || value.get()
                on:input=move |e| {
                    value.set(event_target_value(&e));
                }
            />
        </div>
    }
}

// -----------------------------------------------------------------------------
// 2. Select
// -----------------------------------------------------------------------------

/// Select dropdown option.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Select dropdown over a reactive option list.
#[component]
pub fn Select(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into)] options: Signal<Vec<SelectOption>>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label class="form-label">{label}</label>
            <select
                class="form-select"
                prop:value=move || value.get()
                on:change=move |e| {
                    value.set(event_target_value(&e));
                }
            >
                <For
                    each=move || options.get()
                    key=|opt| opt.value.clone()
                    children=move |opt| {
                        view! {
                            <option value=opt.value.clone()>{opt.label}</option>
                        }
                    }
                />
            </select>
        </div>
    }
}
