//! Weighted phrase tables for the rubric metrics.
//!
//! Each entry is `(phrase, points)`; a phrase scores once if it appears
//! anywhere in the lowercased response.

pub(super) type Table = &'static [(&'static str, f64)];

// ---------------------------------------------------------------------------
// Organization quality
// ---------------------------------------------------------------------------

pub(super) const ORGANIZATION_LINUX: Table = &[
    ("#!/bin/bash", 8.0),
    ("if", 8.0),
    ("then", 8.0),
    ("else", 8.0),
    ("for", 8.0),
    ("while", 8.0),
    ("&&", 8.0),
    ("||", 8.0),
    ("sudo", 8.0),
    ("systemctl", 8.0),
    ("grep", 8.0),
    ("awk", 8.0),
    ("sed", 8.0),
];

pub(super) const ORGANIZATION_CREATIVE: Table = &[
    ("\n\n", 5.0),
    ("first", 8.0),
    ("second", 6.0),
    ("third", 6.0),
    ("finally", 8.0),
    ("however", 6.0),
    ("therefore", 6.0),
    ("in conclusion", 10.0),
    ("on the other hand", 8.0),
    ("furthermore", 6.0),
    ("moreover", 6.0),
];

pub(super) const ORGANIZATION_REASONING: &[Table] = &[
    &[
        ("introduction", 15.0),
        ("conclusion", 15.0),
        ("analysis", 12.0),
        ("summary", 10.0),
        ("overview", 10.0),
        ("methodology", 12.0),
        ("framework", 15.0),
        ("approach", 8.0),
        ("findings", 10.0),
    ],
    &[
        ("###", 10.0),
        ("##", 8.0),
        ("**", 5.0),
        ("| ", 15.0),
        ("1.", 8.0),
        ("2.", 6.0),
        ("3.", 6.0),
        ("- ", 5.0),
        ("• ", 5.0),
    ],
    &[
        ("step", 6.0),
        ("first", 6.0),
        ("next", 4.0),
        ("then", 4.0),
        ("finally", 8.0),
        ("therefore", 6.0),
        ("thus", 6.0),
        ("hence", 6.0),
    ],
];

// ---------------------------------------------------------------------------
// Technical accuracy
// ---------------------------------------------------------------------------

pub(super) const TECHNICAL_LINUX: Table = &[
    ("sudo", 12.0),
    ("systemctl", 12.0),
    ("chmod", 12.0),
    ("chown", 12.0),
    ("grep -", 12.0),
    ("awk", 12.0),
    ("sed", 12.0),
    ("ps aux", 12.0),
    ("netstat", 12.0),
    ("ss -", 12.0),
    ("iptables", 12.0),
    ("firewall", 12.0),
    ("crontab", 12.0),
];

/// Commands that cost points instead of earning them.
pub(super) const DANGEROUS_LINUX: Table = &[
    ("rm -rf /", 20.0),
    ("chmod 777", 20.0),
    ("* * * * *", 20.0),
    ("> /dev/null 2>&1", 20.0),
];

pub(super) const TECHNICAL_CREATIVE: Table = &[
    ("because", 8.0),
    ("since", 8.0),
    ("therefore", 8.0),
    ("however", 8.0),
    ("although", 8.0),
    ("furthermore", 8.0),
    ("moreover", 8.0),
    ("consequently", 8.0),
    ("nevertheless", 8.0),
    ("meanwhile", 8.0),
];

pub(super) const TECHNICAL_REASONING: &[Table] = &[
    &[
        ("therefore", 10.0),
        ("consequently", 12.0),
        ("hence", 10.0),
        ("thus", 8.0),
        ("it follows that", 15.0),
        ("given that", 10.0),
        ("assuming", 8.0),
        ("conversely", 10.0),
        ("nevertheless", 10.0),
        ("furthermore", 8.0),
    ],
    &[
        ("analysis", 8.0),
        ("framework", 12.0),
        ("methodology", 15.0),
        ("systematic", 10.0),
        ("comprehensive", 10.0),
        ("empirical", 12.0),
        ("theoretical", 12.0),
        ("paradigm", 15.0),
        ("hypothesis", 12.0),
        ("premise", 10.0),
        ("conclusion", 8.0),
        ("inference", 10.0),
        ("deduction", 12.0),
        ("induction", 10.0),
        ("synthesis", 12.0),
        ("evaluation", 8.0),
    ],
    &[
        ("equilibrium", 15.0),
        ("optimization", 12.0),
        ("correlation", 10.0),
        ("statistical", 10.0),
        ("probability", 12.0),
        ("strategy", 8.0),
        ("implementation", 8.0),
        ("assessment", 8.0),
        ("protocol", 10.0),
        ("specification", 10.0),
        ("validation", 12.0),
        ("verification", 12.0),
    ],
    &[
        ("percentage", 6.0),
        ("ratio", 8.0),
        ("coefficient", 12.0),
        ("variable", 8.0),
        ("parameter", 10.0),
        ("metric", 8.0),
    ],
];

/// Regex-matched quantitative signals for technical accuracy.
pub(super) const QUANTITATIVE_PATTERNS: &[(&str, f64)] = &[(r"\d+%", 8.0), (r"\d+\.\d+", 5.0)];

// ---------------------------------------------------------------------------
// Completeness
// ---------------------------------------------------------------------------

pub(super) const COMPLETENESS_LINUX: Table = &[
    ("#!/bin/bash", 10.0),
    ("error handling", 10.0),
    ("logging", 10.0),
    ("exit", 10.0),
    ("return", 10.0),
    ("status", 10.0),
    ("check", 10.0),
    ("validate", 10.0),
    ("test", 10.0),
    ("backup", 10.0),
    ("monitoring", 10.0),
];

pub(super) const COMPLETENESS_CREATIVE: Table = &[
    ("requirement", 12.0),
    ("constraint", 12.0),
    ("criteria", 10.0),
    ("aspect", 8.0),
    ("dimension", 10.0),
    ("perspective", 10.0),
    ("approach", 8.0),
    ("consideration", 8.0),
    ("alternative", 10.0),
    ("option", 8.0),
    ("comprehensive", 15.0),
    ("thorough", 12.0),
    ("complete", 10.0),
    ("detailed", 8.0),
    ("extensive", 10.0),
];

pub(super) const COMPLETENESS_REASONING: &[Table] = &[
    &[
        ("evidence", 10.0),
        ("data", 8.0),
        ("according to", 12.0),
        ("based on", 10.0),
        ("research shows", 15.0),
        ("studies indicate", 15.0),
        ("analysis reveals", 12.0),
        ("findings suggest", 12.0),
        ("results demonstrate", 15.0),
        ("investigation shows", 12.0),
    ],
    &[
        ("multiple", 8.0),
        ("various", 8.0),
        ("several", 6.0),
        ("different", 6.0),
        ("range", 8.0),
        ("spectrum", 10.0),
        ("comprehensive", 15.0),
        ("extensive", 10.0),
        ("thorough", 12.0),
        ("complete", 8.0),
        ("detailed", 8.0),
        ("in-depth", 12.0),
    ],
    &[
        ("perspective", 10.0),
        ("viewpoint", 10.0),
        ("angle", 8.0),
        ("standpoint", 10.0),
        ("approach", 8.0),
        ("lens", 10.0),
        ("framework", 12.0),
        ("context", 8.0),
        ("dimension", 10.0),
        ("aspect", 8.0),
        ("facet", 10.0),
        ("component", 8.0),
    ],
    &[
        ("synthesis", 15.0),
        ("integration", 12.0),
        ("combination", 10.0),
        ("merge", 8.0),
        ("consolidation", 12.0),
        ("unification", 12.0),
        ("convergence", 10.0),
        ("connection", 8.0),
        ("relationship", 8.0),
        ("correlation", 10.0),
        ("interdependence", 12.0),
    ],
];

// ---------------------------------------------------------------------------
// Thoroughness
// ---------------------------------------------------------------------------

pub(super) const THOROUGHNESS_LINUX: Table = &[
    ("explanation", 12.0),
    ("comment", 8.0),
    ("documentation", 15.0),
    ("verbose", 10.0),
    ("detailed", 12.0),
    ("comprehensive", 15.0),
    ("step-by-step", 12.0),
    ("example", 10.0),
    ("troubleshooting", 12.0),
    ("debugging", 12.0),
    ("configuration", 10.0),
];

pub(super) const THOROUGHNESS_CREATIVE: Table = &[
    ("explore", 10.0),
    ("consider", 8.0),
    ("alternative", 10.0),
    ("perspective", 10.0),
    ("angle", 8.0),
    ("approach", 8.0),
    ("innovative", 15.0),
    ("unique", 12.0),
    ("original", 12.0),
    ("creative", 10.0),
    ("imagination", 12.0),
    ("inventive", 12.0),
    ("novel", 10.0),
    ("unconventional", 15.0),
    ("breakthrough", 15.0),
    ("pioneering", 12.0),
];

pub(super) const THOROUGHNESS_REASONING: &[Table] = &[
    &[
        ("analyze", 12.0),
        ("synthesize", 15.0),
        ("evaluate", 12.0),
        ("interpret", 10.0),
        ("assess", 10.0),
        ("examine", 10.0),
        ("investigate", 12.0),
        ("scrutinize", 15.0),
        ("dissect", 12.0),
        ("deconstruct", 15.0),
        ("unpack", 10.0),
        ("elaborate", 8.0),
    ],
    &[
        ("rigorous", 15.0),
        ("systematic", 12.0),
        ("methodical", 12.0),
        ("meticulous", 15.0),
        ("precise", 10.0),
        ("accurate", 8.0),
        ("careful", 8.0),
        ("thorough", 12.0),
        ("comprehensive", 12.0),
        ("exhaustive", 15.0),
        ("detailed", 8.0),
        ("extensive", 10.0),
    ],
    &[
        ("complex", 10.0),
        ("sophisticated", 15.0),
        ("nuanced", 15.0),
        ("multifaceted", 15.0),
        ("intricate", 12.0),
        ("elaborate", 10.0),
        ("comprehensive", 12.0),
        ("profound", 15.0),
        ("deep", 8.0),
        ("extensive", 10.0),
        ("intensive", 12.0),
        ("substantial", 10.0),
    ],
    &[
        ("implications", 12.0),
        ("consequences", 12.0),
        ("ramifications", 15.0),
        ("significance", 10.0),
        ("importance", 8.0),
        ("relevance", 8.0),
        ("application", 10.0),
        ("implementation", 10.0),
        ("practical", 8.0),
        ("theoretical", 10.0),
        ("empirical", 12.0),
        ("conceptual", 10.0),
    ],
];

// ---------------------------------------------------------------------------
// Reliability
// ---------------------------------------------------------------------------

pub(super) const RELIABILITY_LINUX: Table = &[
    ("backup", 12.0),
    ("error", 8.0),
    ("check", 10.0),
    ("validate", 12.0),
    ("secure", 10.0),
    ("permission", 10.0),
    ("log", 8.0),
    ("monitor", 10.0),
    ("test", 10.0),
    ("verify", 12.0),
    ("robust", 15.0),
    ("stable", 12.0),
    ("reliable", 15.0),
    ("safe", 8.0),
];

pub(super) const RELIABILITY_CREATIVE: Table = &[
    ("consistent", 12.0),
    ("coherent", 12.0),
    ("logical", 10.0),
    ("reasonable", 10.0),
    ("appropriate", 10.0),
    ("suitable", 10.0),
    ("relevant", 10.0),
    ("applicable", 10.0),
    ("feasible", 12.0),
    ("practical", 10.0),
    ("viable", 12.0),
    ("realistic", 10.0),
    ("balanced", 10.0),
    ("proportionate", 12.0),
    ("well-reasoned", 15.0),
];

pub(super) const RELIABILITY_REASONING: &[Table] = &[
    &[
        ("verify", 12.0),
        ("check", 8.0),
        ("confirm", 10.0),
        ("validate", 12.0),
        ("double-check", 15.0),
        ("review", 8.0),
        ("examine", 8.0),
        ("test", 8.0),
        ("audit", 12.0),
        ("inspect", 10.0),
        ("scrutinize", 15.0),
        ("cross-check", 15.0),
        ("re-examine", 12.0),
    ],
    &[
        ("accurate", 12.0),
        ("precise", 12.0),
        ("correct", 10.0),
        ("reliable", 15.0),
        ("trustworthy", 15.0),
        ("credible", 12.0),
        ("valid", 10.0),
        ("sound", 10.0),
        ("robust", 12.0),
        ("rigorous", 15.0),
        ("consistent", 12.0),
        ("coherent", 10.0),
        ("logical", 10.0),
        ("systematic", 12.0),
    ],
    &[
        ("revise", 12.0),
        ("refine", 12.0),
        ("improve", 8.0),
        ("enhance", 8.0),
        ("optimize", 10.0),
        ("adjust", 8.0),
        ("modify", 8.0),
        ("update", 8.0),
        ("correct", 12.0),
        ("amend", 10.0),
        ("clarify", 10.0),
        ("specify", 8.0),
        ("elaborate", 8.0),
    ],
    &[
        ("confident", 10.0),
        ("certain", 10.0),
        ("sure", 6.0),
        ("definite", 10.0),
        ("clear", 8.0),
        ("obvious", 8.0),
        ("evident", 10.0),
        ("apparent", 8.0),
        ("established", 12.0),
        ("proven", 12.0),
        ("demonstrated", 12.0),
        ("confirmed", 10.0),
        ("verified", 12.0),
    ],
];

// ---------------------------------------------------------------------------
// Scope coverage
// ---------------------------------------------------------------------------

pub(super) const SCOPE_LINUX: Table = &[
    ("requirement", 8.0),
    ("specification", 10.0),
    ("edge case", 12.0),
    ("exception", 10.0),
    ("alternative", 8.0),
    ("option", 8.0),
    ("parameter", 8.0),
    ("configuration", 10.0),
    ("scenario", 8.0),
    ("use case", 10.0),
    ("implementation", 8.0),
    ("deployment", 10.0),
];

pub(super) const SCOPE_CREATIVE: Table = &[
    ("aspect", 8.0),
    ("dimension", 10.0),
    ("perspective", 10.0),
    ("viewpoint", 10.0),
    ("angle", 8.0),
    ("consideration", 10.0),
    ("factor", 8.0),
    ("element", 8.0),
    ("possibility", 10.0),
    ("scenario", 8.0),
    ("variation", 10.0),
    ("option", 8.0),
    ("opportunity", 8.0),
    ("potential", 8.0),
    ("implication", 10.0),
];

pub(super) const SCOPE_REASONING: &[Table] = &[
    &[
        ("comprehensive", 12.0),
        ("extensive", 10.0),
        ("broad", 8.0),
        ("wide", 8.0),
        ("range", 8.0),
        ("spectrum", 10.0),
        ("variety", 8.0),
        ("diverse", 8.0),
        ("multiple", 8.0),
        ("various", 8.0),
        ("different", 6.0),
        ("several", 6.0),
    ],
    &[
        ("coverage", 10.0),
        ("includes", 6.0),
        ("encompasses", 10.0),
        ("addresses", 8.0),
        ("covers", 6.0),
        ("spans", 8.0),
        ("extends", 8.0),
        ("incorporates", 8.0),
        ("considers", 8.0),
        ("examines", 8.0),
        ("explores", 8.0),
        ("discusses", 6.0),
    ],
    &[
        ("interdisciplinary", 15.0),
        ("cross-disciplinary", 15.0),
        ("multi-faceted", 12.0),
        ("holistic", 12.0),
        ("integrated", 10.0),
        ("comprehensive", 12.0),
        ("multidimensional", 15.0),
    ],
];

// ---------------------------------------------------------------------------
// Domain appropriateness
// ---------------------------------------------------------------------------

pub(super) const DOMAIN_LINUX: Table = &[
    ("command", 6.0),
    ("script", 8.0),
    ("bash", 8.0),
    ("shell", 6.0),
    ("system", 6.0),
    ("service", 8.0),
    ("daemon", 10.0),
    ("process", 6.0),
    ("file", 4.0),
    ("directory", 6.0),
    ("permission", 8.0),
    ("user", 4.0),
    ("group", 6.0),
    ("network", 6.0),
    ("server", 6.0),
    ("configuration", 8.0),
    ("administration", 10.0),
    ("management", 6.0),
    ("monitoring", 8.0),
];

pub(super) const DOMAIN_CREATIVE: Table = &[
    ("creative", 8.0),
    ("innovative", 10.0),
    ("original", 10.0),
    ("unique", 8.0),
    ("artistic", 10.0),
    ("imaginative", 10.0),
    ("inventive", 10.0),
    ("novel", 10.0),
    ("unconventional", 12.0),
    ("alternative", 8.0),
    ("breakthrough", 15.0),
    ("pioneering", 12.0),
    ("visionary", 15.0),
    ("groundbreaking", 15.0),
    ("revolutionary", 12.0),
    ("transformative", 12.0),
];

pub(super) const DOMAIN_REASONING: &[Table] = &[
    &[
        ("analysis", 8.0),
        ("conclusion", 8.0),
        ("logic", 8.0),
        ("reasoning", 10.0),
        ("inference", 10.0),
        ("deduction", 10.0),
        ("induction", 10.0),
        ("argument", 8.0),
        ("evidence", 8.0),
        ("premise", 8.0),
        ("synthesis", 12.0),
        ("evaluation", 10.0),
        ("interpretation", 10.0),
        ("assessment", 8.0),
    ],
    &[
        ("paradigm", 15.0),
        ("framework", 12.0),
        ("methodology", 15.0),
        ("theoretical", 12.0),
        ("empirical", 12.0),
        ("systematic", 10.0),
        ("conceptual", 10.0),
        ("analytical", 10.0),
        ("epistemological", 20.0),
        ("ontological", 20.0),
        ("phenomenological", 20.0),
    ],
    &[
        ("philosophical", 12.0),
        ("metaphysical", 15.0),
        ("existential", 12.0),
        ("dialectical", 15.0),
        ("equilibrium", 15.0),
        ("optimization", 12.0),
        ("strategic", 10.0),
        ("tactical", 10.0),
        ("hypothesis", 12.0),
        ("empirical", 12.0),
        ("statistical", 12.0),
        ("quantitative", 12.0),
        ("constitutional", 15.0),
        ("jurisprudence", 20.0),
        ("precedent", 12.0),
        ("statutory", 12.0),
        ("cognitive", 12.0),
        ("behavioral", 10.0),
        ("psychological", 12.0),
        ("phenomenological", 15.0),
    ],
];

// ---------------------------------------------------------------------------
// Reasoning indicators
// ---------------------------------------------------------------------------

pub(super) const STEP_INDICATORS: &[&str] = &[
    "first", "second", "third", "next", "then", "finally", "step 1", "step 2", "step 3",
];

pub(super) const LOGIC_CONNECTORS: &[&str] = &[
    "because",
    "therefore",
    "consequently",
    "thus",
    "hence",
    "as a result",
    "due to",
    "since",
    "given that",
];

pub(super) const EVIDENCE_INDICATORS: &[&str] = &[
    "according to",
    "based on",
    "evidence shows",
    "data indicates",
    "studies show",
    "research suggests",
];

pub(super) const VERIFICATION_INDICATORS: &[&str] = &[
    "verify",
    "validate",
    "confirm",
    "double-check",
    "review",
    "examine",
    "challenge",
    "question",
];
