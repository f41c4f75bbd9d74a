//! Root application component and shared context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::viewport::TableViewport;
use crate::state::session::SessionState;

/// Root application component.
///
/// Provides the shared session context and renders the viewport
/// full-screen. There is no routing: the table is the whole app.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    provide_context(session);

    view! {
        <Title text="Arcane VTT"/>

        <main class="table-shell">
            <TableViewport/>
        </main>
    }
}
