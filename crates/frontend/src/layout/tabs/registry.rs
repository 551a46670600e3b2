//! Tab key to view mapping. Every tab the console can open is listed here.

use super::tab_labels::{
    split_key, AHLIA_REPORTS, CHECKS, COMPANIES, CUSTOMERS, CUSTOMER_DETAILS, INSURANCES,
    MASHREQ_REPORTS, PALESTINE_REPORTS, TRUST_REPORTS,
};
use crate::domain::a001_insured::ui::details::InsuredDetails;
use crate::domain::a001_insured::ui::list::InsuredList;
use crate::domain::a003_insurance::ui::list::InsuranceList;
use crate::domain::a004_check::ui::list::CheckList;
use crate::domain::a005_insurance_company::ui::list::InsuranceCompanyList;
use crate::domain::a006_ahlia_report::ui::list::AhliaReportList;
use crate::domain::a007_mashreq_report::ui::list::MashreqReportList;
use crate::domain::a008_palestine_report::ui::list::PalestineReportList;
use crate::domain::a009_trust_report::ui::list::TrustReportList;
use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

fn bad_key(key: &str) -> AnyView {
    log::warn!("Bad tab key: {}", key);
    view! { <div class="placeholder">{"Unknown page"}</div> }.into_any()
}

/// Render the content of the tab with the given key.
///
/// Detail keys carry their scope ids; a key with the wrong number of ids
/// renders a placeholder instead of a half-scoped page.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let tab_key = key.to_string();
    let (prefix, ids) = split_key(key);

    match (prefix, ids.as_slice()) {
        // ═══════════════════════════════════════════════════════════════════
        // Customers, vehicles, insurances, checks
        // ═══════════════════════════════════════════════════════════════════
        (CUSTOMERS, []) => view! { <InsuredList /> }.into_any(),
        (CUSTOMER_DETAILS, [insured_id]) => {
            let insured_id = insured_id.to_string();
            view! {
                <InsuredDetails
                    insured_id=insured_id
                    tab_key=tab_key
                    tabs_store=tabs_store
                />
            }
            .into_any()
        }
        (INSURANCES, [insured_id, vehicle_id]) => {
            let insured_id = insured_id.to_string();
            let vehicle_id = vehicle_id.to_string();
            view! {
                <InsuranceList
                    insured_id=insured_id
                    vehicle_id=vehicle_id
                    tab_key=tab_key
                    tabs_store=tabs_store
                />
            }
            .into_any()
        }
        (CHECKS, [insured_id, vehicle_id, insurance_id]) => {
            let insured_id = insured_id.to_string();
            let vehicle_id = vehicle_id.to_string();
            let insurance_id = insurance_id.to_string();
            view! {
                <CheckList
                    insured_id=insured_id
                    vehicle_id=vehicle_id
                    insurance_id=insurance_id
                />
            }
            .into_any()
        }

        // ═══════════════════════════════════════════════════════════════════
        // Insurance companies
        // ═══════════════════════════════════════════════════════════════════
        (COMPANIES, []) => view! { <InsuranceCompanyList /> }.into_any(),

        // ═══════════════════════════════════════════════════════════════════
        // Accident reports
        // ═══════════════════════════════════════════════════════════════════
        (AHLIA_REPORTS, []) => view! { <AhliaReportList /> }.into_any(),
        (MASHREQ_REPORTS, []) => view! { <MashreqReportList /> }.into_any(),
        (PALESTINE_REPORTS, []) => view! { <PalestineReportList /> }.into_any(),
        (TRUST_REPORTS, []) => view! { <TrustReportList /> }.into_any(),

        _ => bad_key(key),
    }
}
