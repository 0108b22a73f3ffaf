use crate::api::{ApiError, CODE_UNKNOWN};
use leptos::*;
use serde_json::Value;

/// `field: message` lines from a validation payload such as
/// `{"email": ["Enter a valid email address."]}`.
pub fn field_errors(details: &Value) -> Vec<String> {
    let Some(fields) = details.as_object() else {
        return Vec::new();
    };
    fields
        .iter()
        .filter_map(|(field, value)| {
            let messages = value.as_array()?;
            let joined = messages
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(" ");
            (!joined.is_empty()).then(|| format!("{}: {}", field, joined))
        })
        .collect()
}

#[component]
pub fn InlineErrorMessage(error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    let lines = e
                        .details
                        .as_ref()
                        .filter(|_| e.is_validation())
                        .map(field_errors)
                        .unwrap_or_default();
                    if lines.len() > 1 {
                        return view! {
                            <ul class="list-disc list-inside text-sm">
                                {lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                            </ul>
                        }
                        .into_view();
                    }
                    let code = match (e.code.as_str(), e.status) {
                        (CODE_UNKNOWN, _) | ("", _) => return ().into_view(),
                        (code, Some(status)) => format!("{} ({})", code, status),
                        (code, None) => code.to_string(),
                    };
                    view! { <div class="text-xs opacity-75">{"Code: "}{code}</div> }.into_view()
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}
