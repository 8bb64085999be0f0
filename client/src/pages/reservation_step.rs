//! Table-selection step of the reservation wizard.
//!
//! The page collects date, time, and party size into the shared
//! [`ReservationDraft`], mounts the table map once its container is in the
//! DOM, and asks the map for availability whenever the query inputs change.
//! The map writes the chosen table into the hidden `tableId` field and the
//! info panel itself; the draft learns about it through the form port
//! callback.

use leptos::prelude::*;

use crate::components::form_port::{AVAILABILITY_ID, SELECTED_INFO_ID, SUBMIT_ID, TABLE_FIELD_ID};
use crate::components::table_map::TABLE_MAP_CONTAINER_ID;
use crate::state::reservation::ReservationDraft;

#[cfg(feature = "csr")]
use crate::components::form_port::FormPort;
#[cfg(feature = "csr")]
use crate::components::table_map::{TableMap, TableMapRegistry};

#[component]
pub fn ReservationStepPage() -> impl IntoView {
    let draft = expect_context::<RwSignal<ReservationDraft>>();
    let container_ref = NodeRef::<leptos::html::Div>::new();
    let query = Memo::new(move |_| draft.with(ReservationDraft::availability_query));

    #[cfg(feature = "csr")]
    {
        let registry = TableMapRegistry::<TableMap>::new();
        let map_ready = RwSignal::new(false);

        // Mount once the container exists.
        {
            let registry = registry.clone();
            Effect::new(move || {
                if container_ref.get().is_none() || registry.is_installed() {
                    return;
                }
                let port = FormPort::with_callback(move |table_id| draft.update(|d| d.table_id = table_id));
                match TableMap::new(TABLE_MAP_CONTAINER_ID, port) {
                    Ok(map) => {
                        if registry.install(map) {
                            map_ready.set(true);
                        }
                    }
                    Err(err) => log::error!("table map: {err}"),
                }
            });
        }

        // Reload whenever the query inputs change.
        {
            let registry = registry.clone();
            Effect::new(move || {
                if !map_ready.get() {
                    return;
                }
                let Some(query) = query.get() else {
                    return;
                };
                if let Some(map) = registry.get() {
                    map.load_tables(query);
                }
            });
        }

        let handle = window_event_listener(leptos::ev::resize, move |_| {
            if let Some(map) = registry.get() {
                map.resize();
            }
        });
        on_cleanup(move || handle.remove());
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        if !draft.with(ReservationDraft::can_submit) {
            ev.prevent_default();
        }
    };

    view! {
        <section class="reservation-step">
            <h2>"Choose your table"</h2>
            <div class="reservation-step__inputs">
                <label>
                    "Date"
                    <input
                        type="date"
                        prop:value=move || draft.with(|d| d.date.clone())
                        on:input=move |ev| draft.update(|d| d.date = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Time"
                    <input
                        type="time"
                        prop:value=move || draft.with(|d| d.time.clone())
                        on:input=move |ev| draft.update(|d| d.time = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Guests"
                    <input
                        type="number"
                        min="1"
                        on:input=move |ev| draft.update(|d| d.set_guests_input(&event_target_value(&ev)))
                    />
                </label>
            </div>
            <Show when=move || query.with(Option::is_none)>
                <p class="reservation-step__hint">"Pick a date, time, and party size to see open tables."</p>
            </Show>
            <div id=AVAILABILITY_ID class="reservation-step__availability"></div>
            <div id=TABLE_MAP_CONTAINER_ID class="table-map" node_ref=container_ref></div>
            <form class="reservation-step__form" method="post" action="/reservations" on:submit=on_submit>
                <input type="hidden" id=TABLE_FIELD_ID name="tableId" value=""/>
                <input type="hidden" name="date" prop:value=move || draft.with(|d| d.date.clone())/>
                <input type="hidden" name="time" prop:value=move || draft.with(|d| d.time.clone())/>
                <input type="hidden" name="guests" prop:value=move || draft.with(|d| d.guests.to_string())/>
                <div id=SELECTED_INFO_ID class="reservation-step__selected"></div>
                <button id=SUBMIT_ID type="submit" class="reservation-step__submit" disabled=true>
                    "Continue"
                </button>
            </form>
        </section>
    }
}
