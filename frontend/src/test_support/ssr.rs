use leptos::*;

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

/// Renders with resources suppressed so nothing reaches the network.
pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| view().into_view().render_to_string().to_string());
    leptos_reactive::suppress_resource_load(false);
    html
}

/// Like [`render_to_string`], with an [`ApiClient`](crate::api::ApiClient)
/// bound to `base_url` in context.
pub fn render_page<F, N>(base_url: &str, view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    let base_url = base_url.to_string();
    render_to_string(move || {
        crate::test_support::helpers::provide_api(&base_url);
        view()
    })
}
