//! Ordered declarative rule table for the extraction rule layer.
//!
//! Rules are evaluated top to bottom against the lower-cased concatenation of
//! user turns; the first matching rule for a field wins. Order is load-bearing:
//! a negated phrase ("not yet approved") must outrank the bare keyword it
//! contains, and a specific phrase ("customer support") must outrank the
//! generic one ("support").

use super::{FieldConfidence, FieldExtraction, ProspectField};

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRule {
    /// Field this rule fills.
    pub field: ProspectField,
    /// Trigger keywords; any one appearing as a substring fires the rule.
    pub keywords: &'static [&'static str],
    /// Value assigned when the rule fires.
    pub value: &'static str,
    /// Confidence assigned when the rule fires.
    pub confidence: FieldConfidence,
}

const fn rule(
    field: ProspectField,
    keywords: &'static [&'static str],
    value: &'static str,
    confidence: FieldConfidence,
) -> ExtractionRule {
    ExtractionRule {
        field,
        keywords,
        value,
        confidence,
    }
}

/// The ordered rule table.
pub static RULES: &[ExtractionRule] = &[
    // problem_type: specific phrasings first, generic "support" last.
    rule(
        ProspectField::ProblemType,
        &["customer support", "support tickets", "help desk", "helpdesk"],
        "customer_support",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::ProblemType,
        &["lead generation", "more leads", "generate leads", "fill our pipeline"],
        "lead_generation",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::ProblemType,
        &["automat", "manual process", "repetitive work", "paperwork"],
        "process_automation",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::ProblemType,
        &["invoic", "billing", "collections"],
        "billing",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::ProblemType,
        &["data entry", "reporting", "analytics", "dashboards"],
        "data_management",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::ProblemType,
        &["marketing", "campaign", "brand awareness"],
        "marketing",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::ProblemType,
        &["sales team", "close deals", "quota", "crm for sales"],
        "sales_enablement",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::ProblemType,
        &["support"],
        "customer_support",
        FieldConfidence::Vague,
    ),
    rule(
        ProspectField::ProblemType,
        &["struggling", "challenge", "pain point"],
        "other",
        FieldConfidence::Vague,
    ),
    // industry
    rule(
        ProspectField::Industry,
        &["construction", "contractor", "job site"],
        "construction",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::Industry,
        &["healthcare", "hospital", "clinic", "medical practice"],
        "healthcare",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::Industry,
        &["bank", "financial services", "insurance", "fintech", "lending"],
        "finance",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::Industry,
        &["retail", "ecommerce", "e-commerce", "online store"],
        "retail",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::Industry,
        &["manufactur", "factory", "production line"],
        "manufacturing",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::Industry,
        &["software company", "saas", "tech startup", "we build software"],
        "technology",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::Industry,
        &["logistics", "freight", "shipping", "warehouse"],
        "logistics",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::Industry,
        &["restaurant", "hotel", "hospitality"],
        "hospitality",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::Industry,
        &["law firm", "legal practice", "accounting firm", "consultancy", "agency"],
        "professional_services",
        FieldConfidence::Clear,
    ),
    // job_function
    rule(
        ProspectField::JobFunction,
        &["ceo", "chief executive", "founder", "owner", "president", "cto", "cfo", "coo"],
        "c_level",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::JobFunction,
        &["vice president", "vp of", "svp", "evp"],
        "vp_level",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::JobFunction,
        &["director"],
        "director_level",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::JobFunction,
        &["manager", "head of", "team lead"],
        "manager_level",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::JobFunction,
        &["engineer", "analyst", "coordinator", "specialist", "developer"],
        "individual_contributor",
        FieldConfidence::Clear,
    ),
    // decision_role: explicit statements outrank the title heuristic.
    rule(
        ProspectField::DecisionRole,
        &["i decide", "i make the decision", "final say", "i sign off", "i approve the"],
        "final_decision_maker",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::DecisionRole,
        &["ceo", "founder", "owner", "president"],
        "final_decision_maker",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::DecisionRole,
        &["recommend", "my boss", "our board", "committee", "need buy-in"],
        "influencer",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::DecisionRole,
        &["just researching", "gathering information", "comparing options"],
        "researcher",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::DecisionRole,
        &["just looking"],
        "researcher",
        FieldConfidence::Vague,
    ),
    // solution_preference
    rule(
        ProspectField::SolutionPreference,
        &["off the shelf", "off-the-shelf", "ready-made", "existing tool", "existing product"],
        "off_the_shelf",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::SolutionPreference,
        &["custom", "bespoke", "built for us", "tailored"],
        "custom_build",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::SolutionPreference,
        &["managed service", "done for us", "outsource", "full service"],
        "managed_service",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::SolutionPreference,
        &["open to options", "whatever works", "not sure what we need"],
        "undecided",
        FieldConfidence::Vague,
    ),
    // implementation_capacity
    rule(
        ProspectField::ImplementationCapacity,
        &["our it team", "in-house team", "internal team", "our developers", "our engineers"],
        "internal_team",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::ImplementationCapacity,
        &["implementation partner", "need help implementing", "need a partner"],
        "needs_partner",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::ImplementationCapacity,
        &["no technical team", "no one technical", "nobody technical"],
        "no_capacity",
        FieldConfidence::Clear,
    ),
    // business_urgency
    rule(
        ProspectField::BusinessUrgency,
        &["urgent", "immediately", "asap", "right away", "this week", "this month"],
        "immediate",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::BusinessUrgency,
        &["this quarter", "next quarter"],
        "this_quarter",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::BusinessUrgency,
        &["this year", "by end of year", "next 6 months", "six months"],
        "this_year",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::BusinessUrgency,
        &["exploring", "no rush", "eventually", "down the road", "someday"],
        "exploring",
        FieldConfidence::Clear,
    ),
    // budget_status: negated approval outranks the bare keyword.
    rule(
        ProspectField::BudgetStatus,
        &["not approved", "not yet approved", "needs approval", "pending approval"],
        "in_planning",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::BudgetStatus,
        &["approved", "signed off", "budget allocated", "budget secured"],
        "approved",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::BudgetStatus,
        &["in planning", "budgeting for", "next year's budget", "working on the budget"],
        "in_planning",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::BudgetStatus,
        &["no budget", "can't afford", "no money"],
        "none",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::BudgetStatus,
        &["exploring", "just looking", "early stage", "new technologies"],
        "exploring",
        FieldConfidence::Clear,
    ),
    // tech_capability
    rule(
        ProspectField::TechCapability,
        &["engineering team", "we have developers", "api", "integrations"],
        "advanced",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::TechCapability,
        &["crm", "existing software", "some systems"],
        "moderate",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::TechCapability,
        &["spreadsheets", "excel", "some tools"],
        "basic",
        FieldConfidence::Clear,
    ),
    rule(
        ProspectField::TechCapability,
        &["pen and paper", "no computers", "not technical at all"],
        "minimal",
        FieldConfidence::Clear,
    ),
];

/// Applies the rule table to lower-cased user text, filling fields in the
/// extraction. Fields that already hold a known value are skipped, which is
/// what gives earlier rules precedence.
///
/// Also runs the numeric sub-extractors for budget figure and head count.
pub fn apply_rules(user_text: &str, extraction: &mut FieldExtraction) {
    for rule in RULES {
        if extraction.is_known(rule.field) {
            continue;
        }
        if rule.keywords.iter().any(|kw| user_text.contains(kw)) {
            extraction.set(rule.field, rule.value, rule.confidence);
        }
    }

    if !extraction.is_known(ProspectField::BudgetAmount) {
        if let Some(amount) = parse_budget_amount(user_text) {
            extraction.set(
                ProspectField::BudgetAmount,
                amount.to_string(),
                FieldConfidence::Clear,
            );
        }
    }

    if !extraction.is_known(ProspectField::TeamSize) {
        if let Some(count) = parse_head_count(user_text) {
            extraction.set(
                ProspectField::TeamSize,
                count.to_string(),
                FieldConfidence::Clear,
            );
        }
    }
}

/// Words that mark the preceding number as a head count.
const HEAD_COUNT_NOUNS: &[&str] = &[
    "employees", "employee", "people", "person", "workers", "worker", "staff", "headcount",
];

/// Parses a claimed budget figure out of free text.
///
/// Recognizes `$75,000`, `$75k`, `$1.5m`, and bare `75k`-style tokens.
/// Several figures in one transcript resolve to the largest: intake
/// conversations mention seat counts and team sizes in smaller numbers.
pub fn parse_budget_amount(text: &str) -> Option<u64> {
    text.split_whitespace()
        .filter_map(parse_money_token)
        .max()
}

/// Parses a single whitespace token as a money amount.
fn parse_money_token(token: &str) -> Option<u64> {
    let trimmed = token.trim_matches(|c: char| ",.;:!?()".contains(c));
    let (body, dollar_prefixed) = match trimmed.strip_prefix('$') {
        Some(rest) => (rest, true),
        None => (trimmed, false),
    };
    if body.is_empty() {
        return None;
    }

    let (digits, multiplier) = match body.chars().last() {
        Some('k') | Some('K') => (&body[..body.len() - 1], 1_000.0),
        Some('m') | Some('M') => (&body[..body.len() - 1], 1_000_000.0),
        _ => (body, 1.0),
    };

    // A bare number without either a dollar sign or a k/m suffix is not a
    // money amount (it could be a head count or a year).
    if !dollar_prefixed && multiplier == 1.0 {
        return None;
    }

    let normalized: String = digits.chars().filter(|c| *c != ',').collect();
    if normalized.is_empty() {
        return None;
    }
    let value: f64 = normalized.parse().ok()?;
    if value < 0.0 {
        return None;
    }
    Some((value * multiplier) as u64)
}

/// Parses a company head count out of free text.
///
/// Recognizes "200 employees", "200 construction workers" (noun within two
/// tokens of the number), and "team of 12".
pub fn parse_head_count(text: &str) -> Option<u32> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    for (i, token) in tokens.iter().enumerate() {
        // "team of N"
        if *token == "team" && tokens.get(i + 1) == Some(&"of") {
            if let Some(n) = tokens.get(i + 2).and_then(|t| parse_count_token(t)) {
                return Some(n);
            }
        }

        // "N [adjective] <noun>"
        if let Some(n) = parse_count_token(token) {
            let follows = tokens.iter().skip(i + 1).take(2);
            for next in follows {
                let word = next.trim_matches(|c: char| !c.is_alphanumeric());
                if HEAD_COUNT_NOUNS.contains(&word) {
                    return Some(n);
                }
            }
        }
    }
    None
}

/// Parses a token as a plain count (commas allowed, no money markers).
fn parse_count_token(token: &str) -> Option<u32> {
    let trimmed = token.trim_matches(|c: char| ",.;:!?()".contains(c));
    if trimmed.starts_with('$') {
        return None;
    }
    let normalized: String = trimmed.chars().filter(|c| *c != ',').collect();
    if normalized.is_empty() || !normalized.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    normalized.parse().ok()
}
