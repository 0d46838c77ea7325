//! Failed submission banner

use cc_core::{ErrorKind, SubmissionError, VerificationSession};
use leptos::*;

#[component]
pub fn ErrorBanner(error: SubmissionError, session: RwSignal<VerificationSession>) -> impl IntoView {
    let title = match error.kind {
        ErrorKind::Network => "Service unavailable",
        ErrorKind::Status => "Verification failed",
        ErrorKind::Schema => "Unreadable report",
        ErrorKind::Other => "Something went wrong",
    };

    view! {
        <div class="error p-4 rounded-lg bg-red-50 border border-red-200" role="alert">
            <div class="flex items-center justify-between">
                <span class="font-medium text-red-800">{title}</span>
                <button
                    type="button"
                    class="text-sm text-red-600 hover:underline"
                    on:click=move |_| session.update(|s| s.dismiss_error())
                >
                    "Dismiss"
                </button>
            </div>
            <p class="text-sm text-red-700 mt-1">{error.message}</p>
        </div>
    }
}
