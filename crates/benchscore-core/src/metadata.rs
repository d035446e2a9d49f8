//! Domain, evaluation-type and cultural-context inference from test
//! metadata and response content.
//!
//! Every decision is keyword and pattern driven. Each contributing match is
//! recorded in [`ExtractionResult::extraction_sources`] so the inference
//! can be audited.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::definition::TestMetadata;
use crate::domain::CulturalContext;
use crate::obs;
use crate::text::compile_patterns;

// ---------------------------------------------------------------------------
// Domains and evaluation types
// ---------------------------------------------------------------------------

/// Broad test-content category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Creativity,
    Language,
    Social,
    Reasoning,
    Knowledge,
    Integration,
}

impl Domain {
    /// All domains in tie-break order.
    pub const ALL: [Domain; 6] = [
        Domain::Creativity,
        Domain::Language,
        Domain::Social,
        Domain::Reasoning,
        Domain::Knowledge,
        Domain::Integration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Creativity => "creativity",
            Domain::Language => "language",
            Domain::Social => "social",
            Domain::Reasoning => "reasoning",
            Domain::Knowledge => "knowledge",
            Domain::Integration => "integration",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|d| d.as_str() == name)
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of evaluation a test calls for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationType {
    CreativeExpression,
    LinguisticCompetence,
    SocialContext,
    AlternativeLogic,
    TraditionalKnowledge,
    KnowledgeReasoningSynthesis,
    SocialCreativeSolutions,
    MultilingualKnowledgeExpression,
    CulturallySensitiveReasoning,
    ComprehensiveIntegration,
    GeneralReasoning,
}

impl EvaluationType {
    pub const ALL: [EvaluationType; 11] = [
        EvaluationType::CreativeExpression,
        EvaluationType::LinguisticCompetence,
        EvaluationType::SocialContext,
        EvaluationType::AlternativeLogic,
        EvaluationType::TraditionalKnowledge,
        EvaluationType::KnowledgeReasoningSynthesis,
        EvaluationType::SocialCreativeSolutions,
        EvaluationType::MultilingualKnowledgeExpression,
        EvaluationType::CulturallySensitiveReasoning,
        EvaluationType::ComprehensiveIntegration,
        EvaluationType::GeneralReasoning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationType::CreativeExpression => "creative_expression",
            EvaluationType::LinguisticCompetence => "linguistic_competence",
            EvaluationType::SocialContext => "social_context",
            EvaluationType::AlternativeLogic => "alternative_logic",
            EvaluationType::TraditionalKnowledge => "traditional_knowledge",
            EvaluationType::KnowledgeReasoningSynthesis => "knowledge_reasoning_synthesis",
            EvaluationType::SocialCreativeSolutions => "social_creative_solutions",
            EvaluationType::MultilingualKnowledgeExpression => "multilingual_knowledge_expression",
            EvaluationType::CulturallySensitiveReasoning => "culturally_sensitive_reasoning",
            EvaluationType::ComprehensiveIntegration => "comprehensive_integration",
            EvaluationType::GeneralReasoning => "general_reasoning",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl std::fmt::Display for EvaluationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a piece of extraction evidence came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MetadataSource {
    TestMetadata,
    FilePath,
    CategoryConfig,
    ContentAnalysis,
    Inferred,
}

impl MetadataSource {
    pub const ALL: [MetadataSource; 5] = [
        MetadataSource::TestMetadata,
        MetadataSource::FilePath,
        MetadataSource::CategoryConfig,
        MetadataSource::ContentAnalysis,
        MetadataSource::Inferred,
    ];
}

type Sources = BTreeMap<MetadataSource, Vec<String>>;

fn empty_sources() -> Sources {
    MetadataSource::ALL.into_iter().map(|s| (s, Vec::new())).collect()
}

fn merge_sources(into: &mut Sources, from: Sources) {
    for (source, evidence) in from {
        into.entry(source).or_default().extend(evidence);
    }
}

/// Outcome of [`DomainMetadataExtractor::extract_metadata`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionResult {
    pub domain: Option<Domain>,
    pub evaluation_type: Option<EvaluationType>,
    pub cultural_context: CulturalContext,
    /// Mean of the domain, evaluation-type and cultural confidences.
    pub confidence: f64,
    pub extraction_sources: BTreeMap<MetadataSource, Vec<String>>,
    pub processing_notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Pattern tables
// ---------------------------------------------------------------------------

struct DomainSignals {
    domain: Domain,
    keywords: &'static [&'static str],
    patterns: Vec<Regex>,
    file_indicators: &'static [&'static str],
}

static DOMAIN_SIGNALS: Lazy<Vec<DomainSignals>> = Lazy::new(|| {
    vec![
        DomainSignals {
            domain: Domain::Creativity,
            keywords: &[
                "creative", "story", "narrative", "poem", "song", "performance", "artistic",
                "imagination", "original", "innovative", "expressive",
            ],
            patterns: compile_patterns(&[
                r"(?:create|write|compose)\s+(?:a|an|the)\s+(?:story|poem|song|narrative)",
                r"(?:creative|artistic|imaginative)\s+(?:response|work|piece|expression)",
                r"(?:storytelling|narrative|performance)\s+(?:tradition|style|approach)",
                r"(?:cultural|traditional)\s+(?:storytelling|performance|creative)",
            ]),
            file_indicators: &["creativity", "creative", "narrative", "story", "performance"],
        },
        DomainSignals {
            domain: Domain::Language,
            keywords: &[
                "language", "linguistic", "dialect", "register", "code-switching",
                "multilingual", "translation", "communication", "discourse", "pragmatic",
            ],
            patterns: compile_patterns(&[
                r"(?:language|linguistic)\s+(?:variation|competence|ability|skill)",
                r"(?:dialect|register|variety)\s+(?:switching|variation|use)",
                r"(?:code-switching|multilingual)\s+(?:competence|ability|communication)",
                r"(?:pragmatic|discourse)\s+(?:competence|analysis|patterns)",
            ]),
            file_indicators: &["language", "linguistic", "multilingual", "dialect", "pragmatic"],
        },
        DomainSignals {
            domain: Domain::Social,
            keywords: &[
                "social", "cultural", "community", "relationship", "hierarchy", "etiquette",
                "politeness", "interaction", "dynamics", "appropriateness",
            ],
            patterns: compile_patterns(&[
                r"(?:social|cultural)\s+(?:interaction|competence|appropriateness|dynamics)",
                r"(?:community|relationship)\s+(?:dynamics|maintenance|building|patterns)",
                r"(?:hierarchy|power)\s+(?:navigation|dynamics|relationships|structures)",
                r"(?:etiquette|politeness)\s+(?:patterns|rules|conventions|norms)",
            ]),
            file_indicators: &["social", "community", "relationship", "etiquette", "hierarchy"],
        },
        DomainSignals {
            domain: Domain::Reasoning,
            keywords: &[
                "reasoning", "logic", "analysis", "inference", "deduction", "problem-solving",
                "critical", "analytical", "systematic", "logical",
            ],
            patterns: compile_patterns(&[
                r"(?:reasoning|logic|logical)\s+(?:patterns|frameworks|systems|approaches)",
                r"(?:analytical|critical)\s+(?:thinking|analysis|reasoning|approach)",
                r"(?:problem-solving|inference)\s+(?:strategies|methods|approaches|patterns)",
                r"(?:cultural|traditional)\s+(?:logic|reasoning|thinking|analysis)",
            ]),
            file_indicators: &["reasoning", "logic", "analysis", "inference", "critical"],
        },
        DomainSignals {
            domain: Domain::Knowledge,
            keywords: &[
                "knowledge", "information", "facts", "traditional", "indigenous", "cultural",
                "historical", "scientific", "educational", "wisdom",
            ],
            patterns: compile_patterns(&[
                r"(?:knowledge|wisdom)\s+(?:systems|traditions|frameworks|bases)",
                r"(?:traditional|indigenous)\s+(?:knowledge|wisdom|science|practices)",
                r"(?:cultural|historical)\s+(?:knowledge|information|understanding|context)",
                r"(?:factual|scientific)\s+(?:knowledge|information|accuracy|understanding)",
            ]),
            file_indicators: &["knowledge", "traditional", "indigenous", "cultural", "historical"],
        },
        DomainSignals {
            domain: Domain::Integration,
            keywords: INTEGRATION_KEYWORDS,
            patterns: compile_patterns(&[
                r"(?:cross|multi)-(?:domain|disciplinary|cultural)",
                r"(?:integration|synthesis|convergence)\s+(?:of|across|between)",
                r"(?:comprehensive|holistic|unified)\s+(?:approach|solution|analysis)",
                r"(?:combine|merge|integrate)\s+(?:domains|approaches|perspectives)",
            ]),
            file_indicators: &[
                "integration", "cross-domain", "multi-domain", "comprehensive", "synthesis",
            ],
        },
    ]
});

const INTEGRATION_KEYWORDS: &[&str] = &[
    "integration", "cross-domain", "synthesis", "interdisciplinary", "holistic",
    "comprehensive", "multi-domain", "combined", "unified", "convergent",
];

/// Named storytelling traditions, each with its detection patterns.
static TRADITION_PATTERNS: Lazy<Vec<(&'static str, Vec<Regex>)>> = Lazy::new(|| {
    vec![
        (
            "griot",
            compile_patterns(&[
                r"(?:griot|djeli|jali)\s+(?:tradition|storytelling|performance|culture)",
                r"(?:west\s+african|mali|senegal|guinea)\s+(?:storytelling|oral|tradition)",
                r"(?:mandinka|wolof|fulani)\s+(?:tradition|culture|storytelling)",
                r"(?:oral\s+history|genealogy|praise\s+singing)\s+(?:tradition|practice)",
            ]),
        ),
        (
            "dreamtime",
            compile_patterns(&[
                r"(?:dreamtime|dreaming|aboriginal)\s+(?:story|tradition|culture|knowledge)",
                r"(?:indigenous\s+australian|aboriginal\s+australian)\s+(?:tradition|storytelling|culture)",
                r"(?:songlines|country|land)\s+(?:connection|knowledge|tradition)",
                r"(?:ancestor|spirit)\s+(?:beings|stories|tradition|knowledge)",
            ]),
        ),
        (
            "kamishibai",
            compile_patterns(&[
                r"(?:kamishibai|paper\s+theater)\s+(?:storytelling|performance|tradition)",
                r"japanese\s+(?:storytelling|visual\s+storytelling|performance)\s+(?:tradition|art)",
                r"(?:visual\s+narrative|picture\s+story)\s+(?:performance|telling|tradition)",
                r"(?:street\s+performance|traveling\s+theater)\s+(?:tradition|storytelling)",
            ]),
        ),
        (
            "oral_tradition",
            compile_patterns(&[
                r"(?:oral\s+tradition|oral\s+culture|oral\s+literature)\s+(?:storytelling|performance)",
                r"(?:traditional\s+storytelling|folk\s+narrative|cultural\s+narrative)",
                r"(?:community\s+storytelling|collective\s+memory|cultural\s+transmission)",
                r"(?:intergenerational|ancestral)\s+(?:knowledge|wisdom|storytelling|tradition)",
            ]),
        ),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContextField {
    Traditions,
    CulturalGroups,
    KnowledgeSystems,
    PerformanceAspects,
    LinguisticVarieties,
}

const CULTURAL_KEYWORDS: &[(ContextField, &str, &[&str])] = &[
    (
        ContextField::Traditions,
        "traditions",
        &[
            "griot", "dreamtime", "kamishibai", "oral tradition", "storytelling tradition",
            "folktale", "folklore", "legend", "myth", "traditional story", "cultural story",
            "ancestral story", "tribal story", "indigenous story", "community story",
            "ceremonial", "ritual", "spiritual", "sacred", "traditional practice",
        ],
    ),
    (
        ContextField::CulturalGroups,
        "cultural_groups",
        &[
            "african", "west african", "aboriginal", "indigenous", "japanese", "chinese",
            "native american", "first nations", "maori", "inuit", "celtic", "nordic",
            "mediterranean", "south american", "polynesian", "melanesian", "micronesian",
            "asian", "european", "middle eastern", "caribbean", "pacific islander",
        ],
    ),
    (
        ContextField::KnowledgeSystems,
        "knowledge_systems",
        &[
            "traditional knowledge", "traditional medicine", "herbal knowledge",
            "ecological wisdom", "agricultural practice", "indigenous knowledge",
            "ancestral wisdom", "cultural knowledge", "navigation system",
            "astronomical knowledge", "weather prediction", "seasonal cycles",
            "spiritual practice", "ceremonial knowledge", "ritual understanding",
            "sacred geography", "kinship system", "social organization", "governance system",
            "legal tradition",
        ],
    ),
    (
        ContextField::PerformanceAspects,
        "performance_aspects",
        &[
            "oral performance", "storytelling", "singing", "chanting", "recitation", "drama",
            "dance", "gesture", "body language", "vocal technique", "rhythm", "timing",
            "audience interaction", "call and response", "participation", "improvisation",
            "theatrical", "dramatic", "expressive", "performative", "embodied",
        ],
    ),
    (
        ContextField::LinguisticVarieties,
        "linguistic_varieties",
        &[
            "dialect", "creole", "pidgin", "vernacular", "colloquial", "formal", "informal",
            "academic", "professional", "ceremonial", "ritual", "sacred language",
            "liturgical", "regional variety", "social variety", "ethnic variety",
            "generational variety", "code-switching", "multilingual", "bilingual",
            "polyglot", "lingua franca",
        ],
    ),
];

/// Confidence of a named-tradition pattern match.
const TRADITION_MATCH_CONFIDENCE: f64 = 0.9;
/// Confidence of a flat cultural keyword match.
const KEYWORD_MATCH_CONFIDENCE: f64 = 0.7;
/// Reported when the search ran but found nothing.
const NOTHING_DETECTED_CONFIDENCE: f64 = 0.1;

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Infers domain, evaluation type and cultural context for a test.
///
/// Stateless; the pattern tables are process-wide statics.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainMetadataExtractor;

impl DomainMetadataExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract metadata from the test's metadata block and optional content.
    pub fn extract_metadata(&self, metadata: &TestMetadata, content: &str) -> ExtractionResult {
        let mut sources = empty_sources();

        let (domain, domain_confidence, domain_sources) = self.extract_domain(metadata, content);
        merge_sources(&mut sources, domain_sources);

        let (evaluation_type, eval_confidence, eval_sources) =
            self.extract_evaluation_type(metadata, content, domain);
        merge_sources(&mut sources, eval_sources);

        let (cultural_context, cultural_confidence, cultural_sources) =
            self.extract_cultural_context(metadata, content);
        merge_sources(&mut sources, cultural_sources);

        let confidence = (domain_confidence + eval_confidence + cultural_confidence) / 3.0;

        let mut processing_notes = vec![
            format!("Domain detection confidence: {domain_confidence:.2}"),
            format!("Evaluation type confidence: {eval_confidence:.2}"),
            format!("Cultural context confidence: {cultural_confidence:.2}"),
        ];
        if domain.is_none() {
            processing_notes.push("Warning: Could not determine domain".to_string());
        }
        if evaluation_type.is_none() {
            processing_notes.push("Warning: Could not determine evaluation type".to_string());
        }
        if cultural_confidence < 0.3 {
            processing_notes.push("Warning: Limited cultural context detected".to_string());
        }

        obs::emit_metadata_extracted(
            domain.map(|d| d.as_str()),
            evaluation_type.map(|t| t.as_str()),
            confidence,
        );

        ExtractionResult {
            domain,
            evaluation_type,
            cultural_context,
            confidence,
            extraction_sources: sources,
            processing_notes,
        }
    }

    fn extract_domain(&self, metadata: &TestMetadata, content: &str) -> (Option<Domain>, f64, Sources) {
        let mut sources = empty_sources();
        let mut scores: BTreeMap<Domain, f64> = Domain::ALL.into_iter().map(|d| (d, 0.0)).collect();
        let mut add = |domain: Domain, amount: f64, source: MetadataSource, note: String| {
            *scores.entry(domain).or_insert(0.0) += amount;
            sources.entry(source).or_default().push(note);
        };

        if let Some(path) = metadata.file_path.as_deref().filter(|p| !p.is_empty()) {
            let path = path.to_lowercase();
            for signals in DOMAIN_SIGNALS.iter() {
                for indicator in signals.file_indicators {
                    if path.contains(indicator) {
                        add(
                            signals.domain,
                            0.8,
                            MetadataSource::FilePath,
                            format!("Path contains '{indicator}'"),
                        );
                    }
                }
            }
        }

        if let Some(explicit) = metadata.domain.as_deref().and_then(Domain::parse) {
            add(
                explicit,
                1.0,
                MetadataSource::TestMetadata,
                format!("Explicit domain: {explicit}"),
            );
        }

        let category = metadata.category.as_deref().unwrap_or("");
        let test_id = metadata.test_id.as_deref().unwrap_or("");
        if !category.is_empty() || !test_id.is_empty() {
            let category_text = format!("{category} {test_id}").to_lowercase();
            for signals in DOMAIN_SIGNALS.iter() {
                for keyword in signals.keywords {
                    if category_text.contains(keyword) {
                        add(
                            signals.domain,
                            0.6,
                            MetadataSource::CategoryConfig,
                            format!("Category contains '{keyword}'"),
                        );
                    }
                }
            }
        }

        if metadata.domains_required.len() > 1 {
            add(
                Domain::Integration,
                1.2,
                MetadataSource::TestMetadata,
                format!("Multiple domains required: {:?}", metadata.domains_required),
            );
        }

        if let Some(focus) = metadata.integration_focus.as_deref() {
            let focus = focus.to_lowercase();
            for keyword in INTEGRATION_KEYWORDS {
                if focus.contains(keyword) {
                    add(
                        Domain::Integration,
                        0.8,
                        MetadataSource::TestMetadata,
                        format!("Integration focus contains '{keyword}'"),
                    );
                }
            }
        }

        if !content.is_empty() {
            let content_lower = content.to_lowercase();
            for signals in DOMAIN_SIGNALS.iter() {
                for keyword in signals.keywords {
                    if content_lower.contains(keyword) {
                        add(
                            signals.domain,
                            0.3,
                            MetadataSource::ContentAnalysis,
                            format!("Content contains '{keyword}'"),
                        );
                    }
                }
                for pattern in &signals.patterns {
                    let matches = pattern.find_iter(content).count();
                    if matches > 0 {
                        add(
                            signals.domain,
                            0.4 * matches as f64,
                            MetadataSource::ContentAnalysis,
                            format!("Pattern match: {}", pattern.as_str()),
                        );
                    }
                }
            }
        }

        // first maximum wins, in Domain::ALL order
        let mut best: Option<(Domain, f64)> = None;
        for domain in Domain::ALL {
            let score = scores.get(&domain).copied().unwrap_or(0.0);
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((domain, score));
            }
        }

        match best {
            Some((domain, score)) => (Some(domain), score.min(1.0), sources),
            None => (None, 0.0, sources),
        }
    }

    fn extract_evaluation_type(
        &self,
        metadata: &TestMetadata,
        content: &str,
        domain: Option<Domain>,
    ) -> (Option<EvaluationType>, f64, Sources) {
        let mut sources = empty_sources();
        let mut note = |source: MetadataSource, text: &str| {
            sources.entry(source).or_default().push(text.to_string());
        };

        if let Some(explicit) = metadata.evaluation_type.as_deref().and_then(EvaluationType::parse) {
            note(
                MetadataSource::TestMetadata,
                &format!("Explicit type: {explicit}"),
            );
            return (Some(explicit), 1.0, sources);
        }

        if let Some(domain) = domain {
            let (eval_type, confidence, reason) = match domain {
                Domain::Creativity => (
                    EvaluationType::CreativeExpression,
                    0.8,
                    "Inferred from creativity domain",
                ),
                Domain::Language => (
                    EvaluationType::LinguisticCompetence,
                    0.8,
                    "Inferred from language domain",
                ),
                Domain::Social => (
                    EvaluationType::SocialContext,
                    0.8,
                    "Inferred from social domain",
                ),
                Domain::Reasoning => (
                    EvaluationType::AlternativeLogic,
                    0.8,
                    "Inferred from reasoning domain",
                ),
                Domain::Knowledge => (
                    EvaluationType::TraditionalKnowledge,
                    0.8,
                    "Inferred from knowledge domain",
                ),
                Domain::Integration => integration_type(metadata.category.as_deref().unwrap_or("")),
            };
            note(MetadataSource::Inferred, reason);
            return (Some(eval_type), confidence, sources);
        }

        if !content.is_empty() {
            let content_lower = content.to_lowercase();
            let any = |words: &[&str]| words.iter().any(|w| content_lower.contains(w));
            let inferred = if any(&["create", "story", "poem", "narrative"]) {
                Some((EvaluationType::CreativeExpression, "Creative language detected"))
            } else if any(&["dialect", "language", "register"]) {
                Some((EvaluationType::LinguisticCompetence, "Linguistic language detected"))
            } else if any(&["social", "community", "relationship"]) {
                Some((EvaluationType::SocialContext, "Social language detected"))
            } else {
                None
            };
            if let Some((eval_type, reason)) = inferred {
                note(MetadataSource::ContentAnalysis, reason);
                return (Some(eval_type), 0.6, sources);
            }
        }

        note(MetadataSource::Inferred, "Default fallback to general reasoning");
        (Some(EvaluationType::GeneralReasoning), 0.3, sources)
    }

    fn extract_cultural_context(
        &self,
        metadata: &TestMetadata,
        content: &str,
    ) -> (CulturalContext, f64, Sources) {
        let mut sources = empty_sources();
        let mut analysis_text = metadata.string_values().join(" ");
        if !content.is_empty() {
            analysis_text.push(' ');
            analysis_text.push_str(content);
        }
        let analysis_text = analysis_text.to_lowercase();

        let mut context = CulturalContext::default();
        let mut confidences: Vec<f64> = Vec::new();

        for (tradition, patterns) in TRADITION_PATTERNS.iter() {
            if patterns.iter().any(|p| p.is_match(&analysis_text)) {
                context.traditions.push((*tradition).to_string());
                confidences.push(TRADITION_MATCH_CONFIDENCE);
                sources
                    .entry(MetadataSource::ContentAnalysis)
                    .or_default()
                    .push(format!("Tradition detected: {tradition}"));
            }
        }

        for (field, category, keywords) in CULTURAL_KEYWORDS {
            for keyword in keywords.iter().filter(|k| analysis_text.contains(*k)) {
                confidences.push(KEYWORD_MATCH_CONFIDENCE);
                sources
                    .entry(MetadataSource::ContentAnalysis)
                    .or_default()
                    .push(format!("{category}: {keyword}"));
                let target = match field {
                    ContextField::Traditions => &mut context.traditions,
                    ContextField::CulturalGroups => &mut context.cultural_groups,
                    ContextField::KnowledgeSystems => &mut context.knowledge_systems,
                    ContextField::PerformanceAspects => &mut context.performance_aspects,
                    ContextField::LinguisticVarieties => &mut context.linguistic_varieties,
                };
                target.push((*keyword).to_string());
            }
        }

        let context = CulturalContext::new(
            context.traditions,
            context.knowledge_systems,
            context.performance_aspects,
            context.cultural_groups,
            context.linguistic_varieties,
        );

        if context.is_empty() {
            sources
                .entry(MetadataSource::Inferred)
                .or_default()
                .push("No specific cultural context detected".to_string());
            return (context, NOTHING_DETECTED_CONFIDENCE, sources);
        }

        let confidence = (confidences.iter().sum::<f64>() / confidences.len() as f64).min(1.0);
        (context, confidence, sources)
    }

    /// Fill domain-appropriate defaults into the empty fields of `context`.
    /// Detected values are never overwritten.
    pub fn enhance_cultural_context(
        &self,
        context: &CulturalContext,
        domain: Option<Domain>,
    ) -> CulturalContext {
        let Some(domain) = domain else {
            return context.clone();
        };
        let mut enhanced = context.clone();
        let fill = |field: &mut Vec<String>, defaults: &[&str]| {
            if field.is_empty() {
                field.extend(defaults.iter().map(|d| d.to_string()));
            }
        };

        match domain {
            Domain::Creativity => {
                fill(&mut enhanced.traditions, &["oral_tradition", "storytelling_tradition"]);
                fill(&mut enhanced.performance_aspects, &["storytelling", "oral_performance"]);
            }
            Domain::Language => {
                fill(&mut enhanced.linguistic_varieties, &["vernacular", "formal", "colloquial"]);
            }
            Domain::Social => {
                fill(&mut enhanced.knowledge_systems, &["social_organization", "kinship_system"]);
            }
            Domain::Reasoning => {
                fill(&mut enhanced.knowledge_systems, &["logic_tradition", "reasoning_system"]);
            }
            Domain::Knowledge => {
                fill(
                    &mut enhanced.knowledge_systems,
                    &["traditional_knowledge", "indigenous_knowledge"],
                );
            }
            Domain::Integration => {}
        }
        enhanced
    }

    /// Consistency issues in an extraction; empty when it looks sound.
    pub fn validate_extraction(&self, extraction: &ExtractionResult) -> Vec<String> {
        let mut issues = Vec::new();
        if extraction.confidence < 0.5 {
            issues.push("Low overall extraction confidence".to_string());
        }
        if extraction.domain.is_none() {
            issues.push("Could not determine domain".to_string());
        }
        if extraction.evaluation_type.is_none() {
            issues.push("Could not determine evaluation type".to_string());
        }
        let context = &extraction.cultural_context;
        if context.traditions.is_empty()
            && context.cultural_groups.is_empty()
            && context.knowledge_systems.is_empty()
        {
            issues.push("Very limited cultural context detected".to_string());
        }
        if extraction.domain == Some(Domain::Creativity)
            && !matches!(
                extraction.evaluation_type,
                Some(EvaluationType::CreativeExpression) | Some(EvaluationType::GeneralReasoning)
            )
        {
            issues.push("Domain and evaluation type mismatch".to_string());
        }
        issues
    }
}

fn integration_type(category: &str) -> (EvaluationType, f64, &'static str) {
    const SUBTYPES: &[(&str, EvaluationType, &str)] = &[
        (
            "knowledge_reasoning",
            EvaluationType::KnowledgeReasoningSynthesis,
            "Inferred knowledge-reasoning integration",
        ),
        (
            "social_creativity",
            EvaluationType::SocialCreativeSolutions,
            "Inferred social-creativity integration",
        ),
        (
            "language_knowledge",
            EvaluationType::MultilingualKnowledgeExpression,
            "Inferred language-knowledge integration",
        ),
        (
            "reasoning_social",
            EvaluationType::CulturallySensitiveReasoning,
            "Inferred reasoning-social integration",
        ),
        (
            "cross_domain",
            EvaluationType::ComprehensiveIntegration,
            "Inferred comprehensive integration",
        ),
    ];
    SUBTYPES
        .iter()
        .find(|(key, _, _)| category.contains(key))
        .map(|(_, eval_type, reason)| (*eval_type, 0.9, *reason))
        .unwrap_or((
            EvaluationType::ComprehensiveIntegration,
            0.7,
            "Default integration type",
        ))
}
