//! Team page: members with their service areas, plus the area list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{deleting_signal, enum_options, DeleteConfirmButton, Field, InFlight, SelectField};
use crate::context::use_app_context;
use crate::forms::{AreaForm, MemberForm};
use crate::kpi::workload;
use crate::models::{AreaId, MemberId, Role, TeamMember};
use crate::store::{
    store_remove_area, store_remove_member, store_upsert_area, store_upsert_member, use_app_store,
    AppStateStoreFields,
};
use crate::validation::ValidationErrors;

/// Member's areas with `area` toggled
fn toggle_area(areas: &[AreaId], area: &AreaId) -> Vec<AreaId> {
    if areas.contains(area) {
        areas.iter().filter(|a| *a != area).cloned().collect()
    } else {
        let mut next = areas.to_vec();
        next.push(area.clone());
        next
    }
}

#[component]
fn AreasPanel() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let form = RwSignal::new(AreaForm::default());
    let errors = RwSignal::new(ValidationErrors::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match form.get_untracked().validate() {
            Ok(p) => p,
            Err(e) => return errors.set(e),
        };
        errors.set(ValidationErrors::new());
        spawn_local(async move {
            match api::create_area(&payload).await {
                Ok(area) => {
                    store_upsert_area(&store, area);
                    form.set(AreaForm::default());
                }
                Err(e) => ctx.toasts.error(format!("Could not add area: {}", e)),
            }
        });
    };

    let deleting = RwSignal::new(InFlight::default());
    let delete = move |id: AreaId| {
        if !deleting.try_update(|d| d.begin(id.as_str())).unwrap_or(false) {
            return;
        }
        spawn_local(async move {
            match api::delete_area(&id).await {
                Ok(()) => store_remove_area(&store, &id),
                Err(e) => ctx.toasts.error(format!("Could not delete area: {}", e)),
            }
            deleting.update(|d| d.finish(id.as_str()));
        });
    };

    view! {
        <section class="panel">
            <h2>"Service areas"</h2>
            <ul class="plain-list">
                <For
                    each=move || store.areas().get()
                    key=|a| (a.id.clone(), a.name.clone())
                    children=move |a| {
                        let id = a.id.clone();
                        view! {
                            <li>
                                {a.name.clone()}
                                {a.pincode.clone().map(|p| view! { <span class="muted">{format!(" · {}", p)}</span> })}
                                <DeleteConfirmButton
                                    kind="area"
                                    name=a.name.clone()
                                    busy=deleting_signal(deleting, a.id.as_str())
                                    on_confirm=Callback::new(move |_| delete(id.clone()))
                                />
                            </li>
                        }
                    }
                />
            </ul>
            <form class="form-inline" on:submit=on_submit>
                <Field label="Area" name="name" errors=errors
                    value=Signal::derive(move || form.with(|f| f.name.clone()))
                    on_input=move |v: String| form.update(|f| f.name = v) />
                <Field label="Pincode" name="pincode" errors=errors
                    value=Signal::derive(move || form.with(|f| f.pincode.clone()))
                    on_input=move |v: String| form.update(|f| f.pincode = v) />
                <button type="submit" class="btn">"Add area"</button>
            </form>
        </section>
    }
}

#[component]
pub fn TeamPage() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let form = RwSignal::new(MemberForm::default());
    let errors = RwSignal::new(ValidationErrors::new());

    let open_counts = Memo::new(move |_| {
        let team = store.team().get();
        store.board().with(|b| workload(b.tickets(), &team))
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match form.get_untracked().validate() {
            Ok(p) => p,
            Err(e) => return errors.set(e),
        };
        errors.set(ValidationErrors::new());
        spawn_local(async move {
            match api::create_member(&payload).await {
                Ok(member) => {
                    store_upsert_member(&store, member);
                    form.set(MemberForm::default());
                    ctx.toasts.success("Team member added");
                }
                Err(e) => ctx.toasts.error(format!("Could not add member: {}", e)),
            }
        });
    };

    let set_areas = move |member: TeamMember, area: AreaId| {
        let next = toggle_area(&member.areas, &area);
        spawn_local(async move {
            match api::set_member_areas(&member.id, &next).await {
                Ok(updated) => store_upsert_member(&store, updated),
                Err(e) => ctx.toasts.error(format!("Could not update areas: {}", e)),
            }
        });
    };

    let deleting = RwSignal::new(InFlight::default());
    let delete = move |id: MemberId| {
        if !deleting.try_update(|d| d.begin(id.as_str())).unwrap_or(false) {
            return;
        }
        spawn_local(async move {
            match api::delete_member(&id).await {
                Ok(()) => store_remove_member(&store, &id),
                Err(e) => ctx.toasts.error(format!("Could not remove member: {}", e)),
            }
            deleting.update(|d| d.finish(id.as_str()));
        });
    };

    view! {
        <div class="page team-page">
            <h1>"Team & Areas"</h1>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Name"</th><th>"Role"</th><th>"Phone"</th><th>"Areas"</th>
                        <th class="num">"Open tickets"</th><th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let areas = store.areas().get();
                        store
                            .team()
                            .get()
                            .into_iter()
                            .map(|m| {
                                let id = m.id.clone();
                                let count_id = m.id.clone();
                                let open = move || {
                                    open_counts.with(|rows| {
                                        rows.iter().find(|(mid, _, _)| *mid == count_id).map_or(0, |r| r.2)
                                    })
                                };
                                let chips = areas
                                    .iter()
                                    .map(|a| {
                                        let on = m.areas.contains(&a.id);
                                        let member = m.clone();
                                        let area = a.id.clone();
                                        view! {
                                            <button
                                                class={if on { "chip chip-on" } else { "chip" }}
                                                on:click=move |_| set_areas(member.clone(), area.clone())
                                            >
                                                {a.name.clone()}
                                            </button>
                                        }
                                    })
                                    .collect_view();
                                view! {
                                    <tr>
                                        <td>{m.name.clone()}</td>
                                        <td>{m.role.as_str()}</td>
                                        <td>{m.phone.clone()}</td>
                                        <td class="chips">{chips}</td>
                                        <td class="num">{open}</td>
                                        <td>
                                            <DeleteConfirmButton
                                                kind="team member"
                                                name=m.name.clone()
                                                busy=deleting_signal(deleting, m.id.as_str())
                                                on_confirm=Callback::new(move |_| delete(id.clone()))
                                            />
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>

            <h2>"Add member"</h2>
            <form class="panel form-grid" on:submit=on_submit>
                <Field label="Name" name="name" errors=errors
                    value=Signal::derive(move || form.with(|f| f.name.clone()))
                    on_input=move |v: String| form.update(|f| f.name = v) />
                <SelectField label="Role" options=enum_options(Role::ALL)
                    value=Signal::derive(move || form.with(|f| f.role.clone()))
                    on_change=move |v: String| form.update(|f| f.role = v) />
                <Field label="Phone" name="phone" errors=errors input_type="tel"
                    value=Signal::derive(move || form.with(|f| f.phone.clone()))
                    on_input=move |v: String| form.update(|f| f.phone = v) />
                <Field label="Email" name="email" errors=errors input_type="email"
                    value=Signal::derive(move || form.with(|f| f.email.clone()))
                    on_input=move |v: String| form.update(|f| f.email = v) />
                <div class="form-actions">
                    <button type="submit" class="btn btn-primary">"Add member"</button>
                </div>
            </form>

            <AreasPanel />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_area() {
        let a1 = AreaId::from("A1");
        let a2 = AreaId::from("A2");
        assert_eq!(toggle_area(&[a1.clone()], &a2), vec![a1.clone(), a2.clone()]);
        assert_eq!(toggle_area(&[a1.clone(), a2.clone()], &a1), vec![a2]);
    }
}
