//! Settings page: backend connection and recent log lines.

use leptos::prelude::*;

use crate::config::ApiConfig;
use crate::context::use_app_context;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let ctx = use_app_context();
    let draft = RwSignal::new(ctx.config.get_untracked());
    let (logs, set_logs) = signal(rolling_logger::recent());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut cfg: ApiConfig = draft.get_untracked();
        cfg.normalize();
        match cfg.save() {
            Ok(()) => {
                tracing::info!(base_url = %cfg.base_url, "settings saved");
                draft.set(cfg.clone());
                ctx.config.set(cfg);
                ctx.toasts.success("Settings saved, reloading data");
                ctx.reload();
            }
            Err(e) => ctx.toasts.error(e),
        }
    };

    view! {
        <div class="page settings-page">
            <h1>"Settings"</h1>
            <form class="panel form-grid" on:submit=on_submit>
                <label class="field">
                    <span class="field-label">"API base URL"</span>
                    <input
                        type="text"
                        prop:value=move || draft.with(|c| c.base_url.clone())
                        on:input=move |ev| draft.update(|c| c.base_url = event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field-label">"API token"</span>
                    <input
                        type="password"
                        placeholder="None"
                        prop:value=move || draft.with(|c| c.token.clone().unwrap_or_default())
                        on:input=move |ev| draft.update(|c| c.token = Some(event_target_value(&ev)))
                    />
                </label>
                <label class="field">
                    <span class="field-label">"Operator name"</span>
                    <input
                        type="text"
                        prop:value=move || draft.with(|c| c.operator.clone())
                        on:input=move |ev| draft.update(|c| c.operator = event_target_value(&ev))
                    />
                </label>
                <div class="form-actions">
                    <button type="submit" class="btn btn-primary">"Save"</button>
                </div>
            </form>

            <section class="panel">
                <header class="page-header">
                    <h2>"Recent activity"</h2>
                    <div>
                        <button class="btn btn-small" on:click=move |_| set_logs.set(rolling_logger::recent())>
                            "Refresh"
                        </button>
                        <button
                            class="btn btn-small"
                            on:click=move |_| {
                                rolling_logger::clear();
                                set_logs.set(Vec::new());
                            }
                        >
                            "Clear"
                        </button>
                    </div>
                </header>
                <pre class="log-view">
                    {move || {
                        logs.with(|records| {
                            records.iter().rev().map(|r| r.to_string()).collect::<Vec<_>>().join("\n")
                        })
                    }}
                </pre>
            </section>
        </div>
    }
}
