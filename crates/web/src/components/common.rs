// =============================================================================
// Storedesk Web - Common UI Components
// =============================================================================
// Table of Contents:
// 1. Button
// 2. Card
// 3. Loading Spinner
// 4. Error & Notice Display
// 5. Pager
// 6. Data Table
// =============================================================================

use leptos::prelude::*;
use serde_json::Value;

// -----------------------------------------------------------------------------
// 1. Button
// -----------------------------------------------------------------------------

/// Button variant styles.
#[derive(Clone, Copy, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn-primary",
            ButtonVariant::Secondary => "btn btn-secondary",
            ButtonVariant::Danger => "btn btn-danger",
        }
    }
}

/// Button that shows a spinner while `busy` is set.
#[component]
pub fn Button(
    #[prop(into)] label: String,
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional, into)] busy: Signal<bool>,
    #[prop(optional, into)] on_click: Option<Callback<()>>,
) -> impl IntoView {
    let handle_click = move |_| {
        if let Some(callback) = &on_click {
            callback.run(());
        }
    };

    view! {
        <button
            class=variant.class()
            disabled=move || busy.get()
            on:click=handle_click
        >
            {move || if busy.get() {
                view! { <span class="spinner-small"></span> }.into_any()
            } else {
                view! { <span>{label.clone()}</span> }.into_any()
            }}
        </button>
    }
}

// -----------------------------------------------------------------------------
// 2. Card
// -----------------------------------------------------------------------------

/// Card container component.
#[component]
pub fn Card(
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class=format!("card {}", class)>
            {title.map(|t| view! {
                <div class="card-header">
                    <h3 class="card-title">{t}</h3>
                </div>
            })}
            <div class="card-body">
                {children()}
            </div>
        </div>
    }
}

// -----------------------------------------------------------------------------
// 3. Loading Spinner
// -----------------------------------------------------------------------------

#[component]
pub fn LoadingSpinner(#[prop(optional, into)] message: Option<String>) -> impl IntoView {
    view! {
        <div class="loading-container">
            <div class="spinner"></div>
            {message.map(|m| view! { <p class="loading-message">{m}</p> })}
        </div>
    }
}

// -----------------------------------------------------------------------------
// 4. Error & Notice Display
// -----------------------------------------------------------------------------

/// Error message display.
#[component]
pub fn ErrorDisplay(
    #[prop(into)] message: String,
    #[prop(optional, into)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="error-display">
            <span class="error-message">{message}</span>
            {on_dismiss.map(|dismiss| view! {
                <button class="error-dismiss" on:click=move |_| dismiss.run(())>
                    "✕"
                </button>
            })}
        </div>
    }
}

/// Reactive one-line notice; renders nothing while empty.
#[component]
pub fn Notice(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message
            .get()
            .map(|text| view! { <p class="notice">{text}</p> })
    }
}

// -----------------------------------------------------------------------------
// 5. Pager
// -----------------------------------------------------------------------------

/// Previous/next controls over a zero-based page signal.
#[component]
pub fn Pager(page: RwSignal<u32>, #[prop(into)] total_pages: Signal<u32>) -> impl IntoView {
    view! {
        <div class="pager">
            <button
                class="btn btn-secondary"
                disabled=move || page.get() == 0
                on:click=move |_| page.update(|p| *p = p.saturating_sub(1))
            >
                "이전"
            </button>
            <span class="pager-status">
                {move || format!("{} / {}", page.get() + 1, total_pages.get().max(1))}
            </span>
            <button
                class="btn btn-secondary"
                disabled=move || page.get() + 1 >= total_pages.get()
                on:click=move |_| page.update(|p| *p += 1)
            >
                "다음"
            </button>
        </div>
    }
}

// -----------------------------------------------------------------------------
// 6. Data Table
// -----------------------------------------------------------------------------

/// Render a JSON field as cell text. Missing fields and `null` are blank.
pub fn cell_text(row: &Value, key: &str) -> String {
    match row.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Table over a JSON array; `columns` pairs a field name with its header.
#[component]
pub fn DataTable(
    #[prop(into)] rows: Signal<Value>,
    columns: Vec<(&'static str, &'static str)>,
) -> impl IntoView {
    let headers = columns
        .iter()
        .map(|(_, label)| view! { <th>{*label}</th> })
        .collect_view();

    let body = move || {
        let rows = rows.get();
        let rows = rows.as_array().cloned().unwrap_or_default();
        if rows.is_empty() {
            return view! {
                <tr><td class="empty" colspan=columns.len()>"데이터가 없습니다."</td></tr>
            }
            .into_any();
        }
        rows.iter()
            .map(|row| {
                let cells = columns
                    .iter()
                    .map(|(key, _)| view! { <td>{cell_text(row, key)}</td> })
                    .collect_view();
                view! { <tr>{cells}</tr> }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <table class="data-table">
            <thead><tr>{headers}</tr></thead>
            <tbody>{body}</tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cell_text_formats_scalars() {
        let row = json!({ "name": "라떼", "price": 4500, "soldOut": false, "memo": null });
        assert_eq!(cell_text(&row, "name"), "라떼");
        assert_eq!(cell_text(&row, "price"), "4500");
        assert_eq!(cell_text(&row, "soldOut"), "false");
        assert_eq!(cell_text(&row, "memo"), "");
        assert_eq!(cell_text(&row, "missing"), "");
    }
}
