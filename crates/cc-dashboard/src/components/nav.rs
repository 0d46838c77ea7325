//! Navigation component

use leptos::*;

#[component]
pub fn Nav(endpoint: &'static str) -> impl IntoView {
    view! {
        <nav class="bg-white shadow">
            <div class="container mx-auto px-4">
                <div class="flex justify-between h-16">
                    <div class="flex items-center">
                        <h1 class="text-xl font-bold text-gray-900">"CrediCheck AI"</h1>
                    </div>
                    <div class="flex items-center">
                        <span class="text-sm text-gray-500">{endpoint}</span>
                    </div>
                </div>
            </div>
        </nav>
    }
}
