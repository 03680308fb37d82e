//! Built-in catalog content for the Business x AI readiness quiz.

use super::catalog::{Catalog, Question, QuizOption, ROLE_QUESTION_ID, Screen};

fn q(id: &str, prompt: &str, options: &[(&str, &str, &str)]) -> Question {
    Question::new(
        id,
        prompt,
        options
            .iter()
            .map(|(value, label, icon)| QuizOption::new(value, label, icon))
            .collect(),
    )
}

/// Screen 1: current role / background.
fn current_role_screen() -> Screen {
    Screen::new(
        "current-role",
        "Welcome! Let's understand your professional background to personalize your MBA readiness assessment.",
        vec![q(
            ROLE_QUESTION_ID,
            "What's your current role or background?",
            &[
                ("pm", "Product / Program / Project Manager", "briefcase"),
                ("finance", "Finance / Business Analyst", "chart-bar"),
                ("sales", "Sales / Growth / Revenue roles", "trend-up"),
                ("marketing", "Marketing / Brand / Performance Marketing", "megaphone-simple"),
                ("operations", "Operations / Supply Chain / Strategy", "package"),
                ("founder", "Startup Founder / Entrepreneur", "lightbulb"),
            ],
        )],
    )
    .with_responses(
        ROLE_QUESTION_ID,
        &[
            ("pm", "Excellent! Product managers with AI/data skills are transforming how companies build and scale products."),
            ("finance", "Great choice! Finance and analytics professionals are at the forefront of AI-driven decision making."),
            ("sales", "Perfect! Sales and growth leaders who understand AI are revolutionizing revenue operations."),
            ("marketing", "Awesome! Marketing professionals leveraging AI are seeing unprecedented ROI and scale."),
            ("operations", "Fantastic! Operations and strategy roles are being redefined by AI and automation."),
            ("founder", "Impressive! Founders who master AI have a massive competitive advantage in building and scaling."),
        ],
    )
}

/// Screen 2: experience and career goal.
fn experience_and_goals_screen() -> Screen {
    Screen::new(
        "experience-and-goals",
        "Now let's understand your experience level and what you're aiming to achieve.",
        vec![
            q(
                "experience",
                "How many years of total work experience do you have?",
                &[
                    ("0-1", "0–1 year", "clock"),
                    ("1-3", "1–3 years", "timer"),
                    ("3-6", "3–6 years", "briefcase"),
                    ("6-10", "6–10 years", "trend-up"),
                    ("10+", "10+ years", "trophy"),
                ],
            ),
            q(
                "primaryGoal",
                "What's your primary career goal?",
                &[
                    ("ai-leadership", "Move into a Business + AI leadership role", "chart-line-up"),
                    ("ai-pm", "Become a Product Manager with strong AI/data skills", "target"),
                    ("analytics-strategy", "Transition into Business Analytics / Strategy", "chart-bar"),
                    ("improve-current", "Improve performance & growth in current role", "trend-up"),
                    ("build-startup", "Build / scale my own startup using AI", "rocket"),
                    ("salary-growth", "Higher salary & faster career growth", "currency-inr"),
                ],
            ),
        ],
    )
    .with_responses(
        "experience",
        &[
            ("0-1", "Early in your career - perfect time to build strong business + AI foundations!"),
            ("1-3", "Great timing! You have enough context to leverage AI strategically in your role."),
            ("3-6", "You're at an inflection point. AI skills can accelerate your path to senior/leadership roles."),
            ("6-10", "Solid experience! AI + business acumen will position you for executive opportunities."),
            ("10+", "Seasoned professional! AI mastery will multiply your decades of business insight."),
        ],
    )
    .with_responses(
        "primaryGoal",
        &[
            ("ai-leadership", "Ambitious! AI-fluent business leaders are the most sought-after talent right now."),
            ("ai-pm", "Smart choice! AI-native PMs command premium salaries and drive critical decisions."),
            ("analytics-strategy", "Excellent path! Strategy roles increasingly require AI/data fluency for impact."),
            ("improve-current", "Practical! AI can 10x your effectiveness and make you indispensable in your role."),
            ("build-startup", "Bold! Founders who master AI have unfair advantages in speed, scale, and capital efficiency."),
            ("salary-growth", "Valid goal! Business + AI professionals command 30-50% salary premiums."),
        ],
    )
}

/// Role-specific deep-dive screens, three per role.
fn role_screens() -> Vec<(&'static str, Vec<Screen>)> {
    vec![
        ("pm", vec![
            Screen::new(
                "pm-screen-1",
                "Let's dive into your product thinking and decision-making approach.",
                vec![
                    q(
                        "pm-retention-problem",
                        "You launched a new product/feature. Adoption is high, but 30-day retention is <15%. Engineering says \"feature parity gap,\" sales says \"wrong ICP.\" What do you do first?",
                        &[
                            ("resegment-cohorts", "Re-segment cohorts by acquisition source + JTBD", "chart-bar"),
                            ("qualitative-interviews", "Run qualitative interviews immediately", "users"),
                            ("add-parity", "Add parity features requested by sales", "code"),
                            ("pause-for-data", "Pause roadmap changes for more data", "clock"),
                        ],
                    )
                    .with_helper("This tests problem framing and sequencing"),
                    q(
                        "pm-roadmap-tradeoff",
                        "Leadership wants a big-bang AI feature for positioning. Data shows incremental improvements give better ROI. What do you ship?",
                        &[
                            ("ai-feature", "AI feature to align with leadership narrative", "brain"),
                            ("incremental", "Incremental improvements with strong metrics", "trend-up"),
                            ("ai-wrapper", "A thin AI wrapper on top of existing flows", "lightning"),
                            ("parallel-discovery", "Run parallel discovery for both", "path"),
                        ],
                    )
                    .with_helper("Tests strategic courage and stakeholder management"),
                ],
            ),
            Screen::new(
                "pm-screen-2",
                "Now let's explore your execution approach and metrics thinking.",
                vec![
                    q(
                        "pm-mvp-validation",
                        "You must validate a new workflow in 2 weeks, no engineers assigned. What do you actually build?",
                        &[
                            ("prd-mockups", "PRD + mockups only", "presentation-chart"),
                            ("nocode-prototype", "No-code prototype with realistic data flows", "code"),
                            ("ai-simulated", "AI-simulated workflow (prompt + automation)", "brain"),
                            ("interviews-only", "Customer interviews only", "users"),
                        ],
                    )
                    .with_helper("Tests execution bias and AI leverage"),
                    q(
                        "pm-metrics-conflict",
                        "Your north-star metric improves, but downstream revenue stalls. What do you trust more?",
                        &[
                            ("north-star", "North-star metric", "target"),
                            ("revenue", "Revenue metrics", "currency-inr"),
                            ("leading-indicators", "Leading indicators", "trend-up"),
                            ("unit-economics", "Segment-specific unit economics", "chart-bar"),
                        ],
                    )
                    .with_helper("Tests senior metric thinking"),
                ],
            ),
            Screen::new(
                "pm-screen-3",
                "Finally, let's assess your AI leverage and self-awareness as a PM.",
                vec![
                    q(
                        "pm-ai-leverage",
                        "Where would AI add the highest leverage in your current PM role?",
                        &[
                            ("writing-prds", "Writing PRDs faster", "presentation-chart"),
                            ("research-synthesis", "Synthesizing qualitative research", "users"),
                            ("prioritization", "Prioritization & trade-off modeling", "target"),
                            ("impact-prediction", "Predicting roadmap impact", "chart-line-up"),
                        ],
                    ),
                    q(
                        "pm-failure-reflection",
                        "Looking back, what caused your most expensive product mistake?",
                        &[
                            ("poor-data", "Poor data quality", "x-circle"),
                            ("wrong-assumptions", "Incorrect assumptions", "brain"),
                            ("stakeholder-pressure", "Stakeholder pressure", "users"),
                            ("execution-constraints", "Execution constraints", "gear"),
                        ],
                    )
                    .with_helper("Tests self-awareness and seniority"),
                ],
            ),
        ]),
        ("finance", vec![
            Screen::new(
                "finance-screen-1",
                "Let's assess your analytical depth and stakeholder management.",
                vec![
                    q(
                        "finance-model-contradiction",
                        "Your model contradicts leadership intuition by ~20% downside risk. What do you do?",
                        &[
                            ("recheck-quietly", "Re-check assumptions quietly", "check-circle"),
                            ("present-as-is", "Present model as-is", "presentation-chart"),
                            ("scenarios", "Build upside/downside scenarios", "path"),
                            ("align-narrative", "Align narrative before presenting", "users"),
                        ],
                    )
                    .with_helper("Tests executive communication maturity"),
                    q(
                        "finance-forecast-miss",
                        "Forecast missed by 18% QoQ. Root cause is unclear. What changes next quarter?",
                        &[
                            ("conservative-buffers", "Conservative buffers", "target"),
                            ("granular-drivers", "More granular drivers", "chart-bar"),
                            ("scenario-modeling", "Scenario + sensitivity modeling", "path"),
                            ("predictive-models", "Predictive models with leading signals", "brain"),
                        ],
                    )
                    .with_helper("Tests analytical depth"),
                ],
            ),
            Screen::new(
                "finance-screen-2",
                "Let's explore your approach to data quality and AI application.",
                vec![
                    q(
                        "finance-data-quality",
                        "Key datasets are noisy, but decisions cannot wait. You:",
                        &[
                            ("delay-decision", "Delay decision", "clock"),
                            ("historical-averages", "Use historical averages", "chart-bar"),
                            ("confidence-intervals", "Build confidence intervals", "target"),
                            ("ai-anomalies", "Use AI to flag anomalies & bias", "brain"),
                        ],
                    )
                    .with_helper("Tests real-world analytics maturity"),
                    q(
                        "finance-ai-value",
                        "Where would AI deliver actual business value today?",
                        &[
                            ("faster-reporting", "Faster reporting", "lightning"),
                            ("anomaly-detection", "Anomaly detection", "target"),
                            ("forecasting", "Forecasting & simulations", "chart-line-up"),
                            ("prescriptive", "Prescriptive recommendations", "brain"),
                        ],
                    ),
                ],
            ),
            Screen::new(
                "finance-screen-3",
                "Finally, let's understand your accountability and business impact.",
                vec![
                    q(
                        "finance-ownership",
                        "Who ultimately owns the outcome of your analysis?",
                        &[
                            ("leadership", "Leadership", "users"),
                            ("cross-functional", "Cross-functional team", "buildings"),
                            ("shared", "Me + leadership", "target"),
                            ("me", "Me", "trophy"),
                        ],
                    )
                    .with_helper("Tests trust and seniority"),
                    q(
                        "finance-impact",
                        "Which analysis created the most impact in your career?",
                        &[
                            ("cost-reduction", "Cost reduction", "trend-up"),
                            ("revenue-optimization", "Revenue optimization", "currency-inr"),
                            ("risk-mitigation", "Risk mitigation", "check-circle"),
                            ("strategic-pivot", "Strategic pivot", "path"),
                        ],
                    )
                    .with_helper("Tests business orientation"),
                ],
            ),
        ]),
        ("sales", vec![
            Screen::new(
                "sales-screen-1",
                "Let's dive into your sales approach and revenue thinking.",
                vec![
                    q(
                        "sales-pipeline-reality",
                        "Pipeline coverage is 3×, but close rate drops. Your first move?",
                        &[
                            ("push-volume", "Push volume", "trend-up"),
                            ("tighten-qualification", "Tighten qualification", "target"),
                            ("analyze-winloss", "Analyze win/loss patterns", "chart-bar"),
                            ("change-pricing", "Change pricing/packaging", "currency-inr"),
                        ],
                    )
                    .with_helper("Tests revenue maturity"),
                    q(
                        "sales-deal-stuck",
                        "A large deal stalls at final approval. You:",
                        &[
                            ("increase-followups", "Increase follow-ups", "clock"),
                            ("escalate-internally", "Escalate internally", "users"),
                            ("analyze-blockers", "Analyze historical blockers", "chart-bar"),
                            ("change-structure", "Change deal structure", "path"),
                        ],
                    )
                    .with_helper("Tests pattern recognition"),
                ],
            ),
            Screen::new(
                "sales-screen-2",
                "Now let's explore your AI application and systems thinking.",
                vec![
                    q(
                        "sales-ai-usage",
                        "Where does AI actually help today?",
                        &[
                            ("email-drafts", "Email drafts", "lightning"),
                            ("call-summaries", "Call summaries", "presentation-chart"),
                            ("deal-risk", "Deal risk prediction", "target"),
                            ("pricing-optimization", "Pricing & discount optimization", "currency-inr"),
                        ],
                    )
                    .with_helper("Tests senior AI usage"),
                    q(
                        "sales-target-miss",
                        "You miss quota despite strong activity metrics. Why?",
                        &[
                            ("lead-quality", "Lead quality", "target"),
                            ("icp-mismatch", "ICP mismatch", "users"),
                            ("sales-motion", "Sales motion design", "path"),
                            ("market-conditions", "Market conditions", "chart-line-up"),
                        ],
                    )
                    .with_helper("Tests systems thinking"),
                ],
            ),
            Screen::new(
                "sales-screen-3",
                "Finally, let's assess your data maturity and ownership level.",
                vec![
                    q(
                        "sales-forecasting",
                        "Your sales forecast is based on:",
                        &[
                            ("rep-judgment", "Rep judgment", "users"),
                            ("weighted-pipeline", "Weighted pipeline", "target"),
                            ("historical-patterns", "Historical patterns", "chart-bar"),
                            ("predictive-models", "Predictive models", "brain"),
                        ],
                    )
                    .with_helper("Tests data maturity"),
                    q(
                        "sales-ownership",
                        "What do you own today?",
                        &[
                            ("activities", "Activities", "clock"),
                            ("revenue-number", "Revenue number", "currency-inr"),
                            ("team-number", "Team number", "users"),
                            ("region-business", "Region / business", "buildings"),
                        ],
                    )
                    .with_helper("Tests seniority"),
                ],
            ),
        ]),
        ("marketing", vec![
            Screen::new(
                "marketing-screen-1",
                "Let's explore your marketing analytics and strategic thinking.",
                vec![
                    q(
                        "marketing-conflicting-signals",
                        "CTR ↑, CAC ↑, Revenue ↓. What do you trust?",
                        &[
                            ("ctr", "CTR", "chart-line-up"),
                            ("cac", "CAC", "currency-inr"),
                            ("ltv-cac-cohort", "LTV/CAC by cohort", "chart-bar"),
                            ("revenue-attribution", "Revenue attribution model", "target"),
                        ],
                    )
                    .with_helper("Tests metric hierarchy understanding"),
                    q(
                        "marketing-budget-shock",
                        "Budget cut 30%, targets unchanged. What do you cut first?",
                        &[
                            ("experiments", "Experiments", "lightning"),
                            ("branding", "Branding", "megaphone-simple"),
                            ("low-ltv-segments", "Low LTV segments", "target"),
                            ("agency-spend", "Agency spend", "currency-inr"),
                        ],
                    )
                    .with_helper("Tests ROI thinking"),
                ],
            ),
            Screen::new(
                "marketing-screen-2",
                "Now let's assess your AI maturity and pragmatic decision-making.",
                vec![
                    q(
                        "marketing-ai-application",
                        "Where does AI create defensible advantage?",
                        &[
                            ("content-generation", "Content generation", "lightning"),
                            ("creative-testing", "Creative testing", "target"),
                            ("audience-prediction", "Audience prediction", "users"),
                            ("automated-optimization", "Automated optimization loops", "gear"),
                        ],
                    )
                    .with_helper("Tests AI maturity"),
                    q(
                        "marketing-attribution-reality",
                        "Attribution data is unreliable. You:",
                        &[
                            ("accept-imperfect", "Accept imperfect data", "check-circle"),
                            ("switch-model", "Switch attribution model", "path"),
                            ("directional-insights", "Build directional insights", "chart-bar"),
                            ("ai-infer-patterns", "Use AI to infer patterns", "brain"),
                        ],
                    )
                    .with_helper("Tests senior pragmatism"),
                ],
            ),
            Screen::new(
                "marketing-screen-3",
                "Finally, let's understand your systems thinking and accountability.",
                vec![
                    q(
                        "marketing-scale-failure",
                        "Growth stalls after initial scale. Why?",
                        &[
                            ("saturation", "Saturation", "chart-line-up"),
                            ("messaging-mismatch", "Messaging mismatch", "megaphone-simple"),
                            ("funnel-leakage", "Funnel leakage", "path"),
                            ("ops-constraints", "Ops constraints", "gear"),
                        ],
                    )
                    .with_helper("Tests systems thinking"),
                    q(
                        "marketing-leadership-metric",
                        "Which metric do you defend in leadership reviews?",
                        &[
                            ("leads", "Leads", "users"),
                            ("cac", "CAC", "currency-inr"),
                            ("revenue-contribution", "Revenue contribution", "chart-line-up"),
                            ("ltv", "LTV", "trophy"),
                        ],
                    )
                    .with_helper("Tests senior accountability"),
                ],
            ),
        ]),
        ("operations", vec![
            Screen::new(
                "operations-screen-1",
                "Let's explore your operations thinking and problem-solving approach.",
                vec![
                    q(
                        "operations-scale-stress",
                        "Demand doubles in 90 days. What breaks first?",
                        &[
                            ("hiring-capacity", "Hiring capacity", "users"),
                            ("process-design", "Process design", "gear"),
                            ("data-visibility", "Data visibility", "database"),
                            ("vendor-reliability", "Vendor reliability", "buildings"),
                        ],
                    )
                    .with_helper("Tests system-level thinking"),
                    q(
                        "operations-cost-sla",
                        "Costs rise, SLA drops. What do you fix first?",
                        &[
                            ("headcount", "Headcount", "users"),
                            ("process-bottlenecks", "Process bottlenecks", "path"),
                            ("demand-variability", "Demand variability", "chart-line-up"),
                            ("automation-gaps", "Automation gaps", "gear"),
                        ],
                    )
                    .with_helper("Tests ops maturity"),
                ],
            ),
            Screen::new(
                "operations-screen-2",
                "Now let's assess your AI application and accountability.",
                vec![
                    q(
                        "operations-ai-leverage",
                        "Where does AI deliver highest ROI?",
                        &[
                            ("reporting", "Reporting", "presentation-chart"),
                            ("forecasting", "Forecasting", "chart-line-up"),
                            ("automation", "Automation", "gear"),
                            ("decision-optimization", "Decision optimization", "brain"),
                        ],
                    )
                    .with_helper("Tests AI application depth"),
                    q(
                        "operations-ownership",
                        "Which metric keeps you up at night?",
                        &[
                            ("task-completion", "Task completion", "check-circle"),
                            ("cost-per-unit", "Cost/unit", "currency-inr"),
                            ("sla-adherence", "SLA adherence", "target"),
                            ("margin", "Margin", "chart-bar"),
                        ],
                    )
                    .with_helper("Tests accountability"),
                ],
            ),
            Screen::new(
                "operations-screen-3",
                "Finally, let's understand your pragmatism and strategic framing.",
                vec![
                    q(
                        "operations-data-constraint",
                        "Ops data is delayed by 2 weeks. You:",
                        &[
                            ("wait", "Wait", "clock"),
                            ("use-proxies", "Use proxies", "target"),
                            ("early-warning", "Build early-warning indicators", "lightning"),
                            ("ai-prediction", "Use AI for prediction", "brain"),
                        ],
                    )
                    .with_helper("Tests senior pragmatism"),
                    q(
                        "operations-strategic-role",
                        "Ops exists primarily to:",
                        &[
                            ("execute-plans", "Execute plans", "check-circle"),
                            ("reduce-cost", "Reduce cost", "currency-inr"),
                            ("enable-scale", "Enable scale", "trend-up"),
                            ("competitive-advantage", "Drive competitive advantage", "trophy"),
                        ],
                    )
                    .with_helper("Tests senior framing"),
                ],
            ),
        ]),
        ("founder", vec![
            Screen::new(
                "founder-screen-1",
                "Let's explore your founder mindset and strategic approach.",
                vec![
                    q(
                        "founder-mvp-failure",
                        "Users sign up but don't return. You:",
                        &[
                            ("add-features", "Add features", "code"),
                            ("increase-marketing", "Increase marketing", "megaphone-simple"),
                            ("reframe-problem", "Reframe problem", "brain"),
                            ("pivot-icp", "Pivot ICP", "users"),
                        ],
                    )
                    .with_helper("Tests founder maturity"),
                    q(
                        "founder-ai-dependency",
                        "Which dependency would AI remove first?",
                        &[
                            ("engineering", "Engineering", "code"),
                            ("marketing", "Marketing", "megaphone-simple"),
                            ("ops", "Ops", "gear"),
                            ("decision-making", "Decision-making", "brain"),
                        ],
                    )
                    .with_helper("Tests AI strategy"),
                ],
            ),
            Screen::new(
                "founder-screen-2",
                "Now let's assess your business maturity and resource prioritization.",
                vec![
                    q(
                        "founder-scale-pain",
                        "Revenue grows, margins fall. Why?",
                        &[
                            ("pricing", "Pricing", "currency-inr"),
                            ("ops-inefficiency", "Ops inefficiency", "gear"),
                            ("customer-mix", "Customer mix", "users"),
                            ("data-blindness", "Data blindness", "database"),
                        ],
                    )
                    .with_helper("Tests business maturity"),
                    q(
                        "founder-resource-constraint",
                        "With 3 people and 6 months, you optimize for:",
                        &[
                            ("growth", "Growth", "trend-up"),
                            ("profitability", "Profitability", "currency-inr"),
                            ("learning", "Learning", "lightbulb"),
                            ("fundraising", "Fundraising", "rocket"),
                        ],
                    )
                    .with_helper("Tests founder intent"),
                ],
            ),
            Screen::new(
                "founder-screen-3",
                "Finally, let's understand your AI strategy and self-awareness.",
                vec![
                    q(
                        "founder-ai-advantage",
                        "AI helps your startup most by:",
                        &[
                            ("speed", "Speed", "lightning"),
                            ("cost", "Cost", "currency-inr"),
                            ("insight", "Insight", "brain"),
                            ("differentiation", "Differentiation", "trophy"),
                        ],
                    )
                    .with_helper("Tests strategic thinking"),
                    q(
                        "founder-failure-pattern",
                        "Your biggest mistake so far?",
                        &[
                            ("hiring-early", "Hiring too early", "users"),
                            ("scaling-fast", "Scaling too fast", "rocket"),
                            ("weak-data", "Weak data", "database"),
                            ("poor-problem", "Poor problem selection", "target"),
                        ],
                    )
                    .with_helper("Tests reflection depth"),
                ],
            ),
        ]),
    ]
}

pub(super) fn builtin_catalog() -> Catalog {
    Catalog::with_intake(
        current_role_screen(),
        vec![experience_and_goals_screen()],
        role_screens()
            .into_iter()
            .map(|(role, screens)| (role.to_string(), screens)),
    )
}
