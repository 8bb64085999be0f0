//! Root application component and context providers.

use leptos::prelude::*;

use crate::pages::reservation_step::ReservationStepPage;
use crate::state::reservation::ReservationDraft;

/// Root application component.
///
/// Provides the reservation draft to the step page.
#[component]
pub fn App() -> impl IntoView {
    let draft = RwSignal::new(ReservationDraft::default());
    provide_context(draft);

    view! {
        <main class="reservation">
            <ReservationStepPage/>
        </main>
    }
}
