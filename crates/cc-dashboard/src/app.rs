//! Main application component

use crate::components::Nav;
use crate::pages::VerifyPage;
use cc_core::DEFAULT_ENDPOINT;
use leptos::*;

/// Service address baked in at build time
pub fn service_endpoint() -> &'static str {
    option_env!("CREDICHECK_ENDPOINT").unwrap_or(DEFAULT_ENDPOINT)
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="App min-h-screen bg-gray-100">
            <Nav endpoint=service_endpoint()/>
            <main class="container mx-auto px-4 py-8">
                <VerifyPage endpoint=service_endpoint()/>
            </main>
        </div>
    }
}
