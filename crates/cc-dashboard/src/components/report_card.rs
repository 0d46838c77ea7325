//! Credibility report card

use super::ClaimCard;
use cc_core::ReportView;
use leptos::*;

#[component]
pub fn ReportCard(report: ReportView) -> impl IntoView {
    let (bg, text) = badge_tone(&report.badge_class);

    view! {
        <div class="report bg-white rounded-lg shadow p-6 space-y-4">
            <h2 class=format!("{} px-3 py-2 rounded-lg text-2xl font-bold {} {}", report.badge_class, bg, text)>
                {report.heading}
            </h2>
            <p class="text-gray-700">{report.explanation}</p>
            <h3 class="text-xl font-semibold">"Claims:"</h3>
            <div class="space-y-3">
                {report
                    .claims
                    .into_iter()
                    .map(|claim| view! { <ClaimCard claim=claim/> })
                    .collect_view()}
            </div>
        </div>
    }
}

fn badge_tone(badge_class: &str) -> (&'static str, &'static str) {
    match badge_class.trim_start_matches("badge ") {
        "green" => ("bg-green-100", "text-green-800"),
        "yellow" => ("bg-yellow-100", "text-yellow-800"),
        "red" => ("bg-red-100", "text-red-800"),
        _ => ("bg-gray-100", "text-gray-800"),
    }
}
