//! Built-in label to schema field mapping for benefits documents.

/// Display label (lowercase) to canonical schema field name.
pub(super) const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    // Stop-loss
    ("stop-loss deductible", "stop_loss_deductible"),
    ("stop loss deductible", "stop_loss_deductible"),
    ("aggregate deductible", "aggregate_deductible"),
    ("specific deductible", "specific_deductible"),
    ("individual deductible", "specific_deductible"),
    ("corridor", "corridor"),
    ("corridor deductible", "corridor"),
    // Contract
    ("contract type", "contract_type"),
    ("contract number", "contract_number"),
    ("policy number", "policy_number"),
    ("group number", "group_number"),
    ("effective date", "effective_date"),
    ("renewal date", "renewal_date"),
    ("termination date", "termination_date"),
    ("expiration date", "expiration_date"),
    // Membership
    ("total members", "total_members"),
    ("enrolled members", "enrolled_members"),
    ("eligible members", "eligible_members"),
    ("lives covered", "lives_covered"),
    ("employee count", "employee_count"),
    // Premium
    ("premium", "premium"),
    ("monthly premium", "monthly_premium"),
    ("annual premium", "annual_premium"),
    ("rate", "rate"),
    ("per member per month", "pmpm"),
    ("pmpm", "pmpm"),
    // Plan
    ("plan name", "plan_name"),
    ("plan type", "plan_type"),
    ("network", "network"),
    ("carrier", "carrier"),
    ("broker", "broker"),
    ("tpa", "tpa"),
    ("third party administrator", "tpa"),
    // Coverage amounts
    ("max benefit", "max_benefit"),
    ("maximum benefit", "max_benefit"),
    ("lifetime maximum", "lifetime_maximum"),
    ("out of pocket max", "out_of_pocket_max"),
    ("out-of-pocket maximum", "out_of_pocket_max"),
    ("oop max", "out_of_pocket_max"),
    // Employer
    ("employer name", "employer_name"),
    ("company name", "company_name"),
    ("organization", "organization"),
    ("sic code", "sic_code"),
    ("industry", "industry"),
    // Contact
    ("address", "address"),
    ("city", "city"),
    ("state", "state"),
    ("zip", "zip_code"),
    ("zip code", "zip_code"),
    ("phone", "phone"),
    ("email", "email"),
    ("contact", "contact_name"),
];
