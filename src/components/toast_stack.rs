//! Toast Stack Component

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = use_app_context().toasts;

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.items()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    view! {
                        <div class=t.kind.css_class() on:click=move |_| toasts.dismiss(id)>
                            {t.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
