//! Verification page

use crate::components::{ErrorBanner, ReportCard};
use cc_core::{
    ClientConfig, CoreError, HttpVerifier, ReportView, Resolution, SubmissionError,
    VerificationService, VerificationSession,
};
use leptos::*;

#[component]
pub fn VerifyPage(endpoint: &'static str) -> impl IntoView {
    let session = create_rw_signal(VerificationSession::new());
    let verifier = store_value(build_verifier(endpoint));

    let on_input = move |ev: ev::Event| {
        session.update(|s| s.update_input(event_target_value(&ev)));
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let Some(submission) = session.try_update(|s| s.submit()) else {
            return;
        };
        let verifier = verifier.get_value();

        spawn_local(async move {
            let outcome = match verifier {
                Ok(verifier) => verifier.verify(&submission.request.text).await,
                Err(message) => Err(CoreError::Config(message)),
            };
            let resolution = session.try_update(|s| s.resolve(submission.seq, outcome));
            if resolution == Some(Resolution::Stale) {
                tracing::debug!("Discarded response for superseded submission {}", submission.seq);
            }
        });
    };

    let pending = create_memo(move |_| session.with(|s| s.is_pending()));
    let report = report_memo(session);
    let error = error_memo(session);

    view! {
        <div class="space-y-6">
            <form on:submit=on_submit class="bg-white rounded-lg shadow p-6 space-y-4">
                <textarea
                    rows="6"
                    placeholder="Paste a social media post or article snippet here..."
                    class="w-full px-4 py-2 border rounded-lg"
                    prop:value=move || session.with(|s| s.input().to_string())
                    on:input=on_input
                />
                <div class="flex items-center space-x-4">
                    <button
                        type="submit"
                        class="bg-blue-600 text-white px-4 py-2 rounded-lg hover:bg-blue-700"
                    >
                        "Verify"
                    </button>
                    <Show when=move || pending.get()>
                        <span class="pending text-gray-500">"Verifying…"</span>
                    </Show>
                </div>
            </form>

            {move || {
                error
                    .get()
                    .map(|error| view! { <ErrorBanner error=error session=session/> })
            }}

            {move || report.get().map(|report| view! { <ReportCard report=report/> })}
        </div>
    }
}

// Keystrokes change the session but not these, so the report DOM is left alone.
fn report_memo(session: RwSignal<VerificationSession>) -> Memo<Option<ReportView>> {
    create_memo(move |_| session.with(|s| s.report()))
}

fn error_memo(session: RwSignal<VerificationSession>) -> Memo<Option<SubmissionError>> {
    create_memo(move |_| session.with(|s| s.error().cloned()))
}

fn build_verifier(endpoint: &str) -> Result<HttpVerifier, String> {
    ClientConfig::new(endpoint)
        .and_then(|config| HttpVerifier::new(&config))
        .map_err(|e| {
            tracing::error!("Cannot reach verification service at {}: {}", endpoint, e);
            e.to_string()
        })
}
