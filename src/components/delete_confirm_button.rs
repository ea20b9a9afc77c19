//! Delete Confirm Button Component
//!
//! Inline "Delete plan Fiber 100?" prompt for list rows. The page tracks which
//! records have a DELETE in flight; while one is pending the prompt stays open
//! with its buttons disabled, and a failed request leaves it open for a retry.

use std::collections::HashSet;

use leptos::prelude::*;

/// Ids of records whose DELETE has not answered yet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InFlight {
    ids: HashSet<String>,
}

impl InFlight {
    /// Mark `id` as deleting; false if it already is (double click)
    pub fn begin(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    pub fn finish(&mut self, id: &str) {
        self.ids.remove(id);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

/// Confirmation text, e.g. "Delete plan Fiber 100?"
pub fn delete_prompt(kind: &str, name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        format!("Delete {}?", kind)
    } else {
        format!("Delete {} {}?", kind, name)
    }
}

/// Signal telling a row's button whether its DELETE is in flight
pub fn deleting_signal(deleting: RwSignal<InFlight>, id: &str) -> Signal<bool> {
    let id = id.to_string();
    Signal::derive(move || deleting.with(|d| d.contains(&id)))
}

/// Inline delete confirmation
///
/// * `kind` - record type shown in the prompt ("plan", "customer")
/// * `name` - the record's display name
/// * `busy` - true while this record's DELETE is in flight
/// * `on_confirm` - starts the DELETE
#[component]
pub fn DeleteConfirmButton(
    kind: &'static str,
    #[prop(into)] name: String,
    busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);
    let prompt = delete_prompt(kind, &name);
    let title = format!("Delete {}", kind);

    view! {
        <Show
            when=move || confirming.get() || busy.get()
            fallback=move || {
                let title = title.clone();
                view! {
                    <button
                        class="delete-btn"
                        title=title
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_confirming.set(true);
                        }
                    >
                        "×"
                    </button>
                }
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">
                    {
                        let prompt = prompt.clone();
                        move || if busy.get() { "Deleting…".to_string() } else { prompt.clone() }
                    }
                </span>
                <button
                    class="confirm-btn"
                    prop:disabled=move || busy.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    prop:disabled=move || busy.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_the_record() {
        assert_eq!(delete_prompt("plan", "Fiber 100"), "Delete plan Fiber 100?");
        assert_eq!(delete_prompt("area", "  "), "Delete area?");
    }

    #[test]
    fn test_in_flight_blocks_second_delete() {
        let mut deleting = InFlight::default();
        assert!(deleting.begin("P1"));
        assert!(!deleting.begin("P1"));
        assert!(deleting.contains("P1"));
        assert!(!deleting.contains("P2"));

        deleting.finish("P1");
        assert!(!deleting.contains("P1"));
        assert!(deleting.begin("P1"));
    }
}
