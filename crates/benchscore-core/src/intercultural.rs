//! Intercultural competence assessment.
//!
//! Scores a response along eight competence dimensions. Each dimension has a
//! table of pattern categories; every category that fires contributes a
//! saturating amount to the score and tags the dimension with its marker.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::definition::TestMetadata;
use crate::domain::{CulturalContext, DimensionEvaluator, EvaluationDimension, MultiDimensionalEvaluator};
use crate::error::{AnalysisError, AnalysisResult};
use crate::text::compile_patterns;

/// Competence dimensions, in evaluation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CompetenceDimension {
    CulturalAwareness,
    CulturalSensitivity,
    CrossCulturalCommunication,
    AdaptationSkills,
    GlobalMindset,
    InterculturalEmpathy,
    CulturalBridgeBuilding,
    BiasAwarenessMitigation,
}

impl CompetenceDimension {
    pub const ALL: [CompetenceDimension; 8] = [
        CompetenceDimension::CulturalAwareness,
        CompetenceDimension::CulturalSensitivity,
        CompetenceDimension::CrossCulturalCommunication,
        CompetenceDimension::AdaptationSkills,
        CompetenceDimension::GlobalMindset,
        CompetenceDimension::InterculturalEmpathy,
        CompetenceDimension::CulturalBridgeBuilding,
        CompetenceDimension::BiasAwarenessMitigation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompetenceDimension::CulturalAwareness => "cultural_awareness",
            CompetenceDimension::CulturalSensitivity => "cultural_sensitivity",
            CompetenceDimension::CrossCulturalCommunication => "cross_cultural_communication",
            CompetenceDimension::AdaptationSkills => "adaptation_skills",
            CompetenceDimension::GlobalMindset => "global_mindset",
            CompetenceDimension::InterculturalEmpathy => "intercultural_empathy",
            CompetenceDimension::CulturalBridgeBuilding => "cultural_bridge_building",
            CompetenceDimension::BiasAwarenessMitigation => "bias_awareness_mitigation",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == name)
    }

    /// Marker appended when the context spans several cultural groups.
    fn multicultural_marker(&self) -> Option<&'static str> {
        match self {
            CompetenceDimension::CulturalAwareness => Some("multicultural_awareness"),
            CompetenceDimension::CulturalBridgeBuilding => Some("multicultural_bridging"),
            _ => None,
        }
    }
}

const DIMENSION_NAMES: &[&str] = &[
    "cultural_awareness",
    "cultural_sensitivity",
    "cross_cultural_communication",
    "adaptation_skills",
    "global_mindset",
    "intercultural_empathy",
    "cultural_bridge_building",
    "bias_awareness_mitigation",
];

/// The seven competence types; bias mitigation is evaluated but not a type.
const SUPPORTED_TYPES: &[&str] = &[
    "cultural_awareness",
    "cultural_sensitivity",
    "cross_cultural_communication",
    "adaptation_skills",
    "global_mindset",
    "intercultural_empathy",
    "cultural_bridge_building",
];

/// Maximum contribution of a single pattern category.
const CATEGORY_CAP: f64 = 0.25;
/// Per-hit retention for the saturating category curve.
const CATEGORY_DECAY: f64 = 0.6;
/// Confidence gained per pattern hit.
const CONFIDENCE_PER_HIT: f64 = 0.12;
/// Score bonus when the context lists more than one cultural group.
const MULTICULTURAL_BONUS: f64 = 0.1;

// ---------------------------------------------------------------------------
// Pattern tables
// ---------------------------------------------------------------------------

struct PatternCategory {
    name: &'static str,
    marker: &'static str,
    patterns: Vec<Regex>,
}

fn category(name: &'static str, marker: &'static str, patterns: &[&str]) -> PatternCategory {
    PatternCategory {
        name,
        marker,
        patterns: compile_patterns(patterns),
    }
}

static PATTERN_TABLES: Lazy<Vec<(CompetenceDimension, Vec<PatternCategory>)>> = Lazy::new(|| {
    vec![
        (
            CompetenceDimension::CulturalAwareness,
            vec![
                category(
                    "cultural_knowledge",
                    "cultural_knowledge",
                    &[
                        r"\bcultural (?:differences|values|norms|practices|backgrounds?)\b",
                        r"\bdifferent cultures\b",
                        r"\btraditions?\b",
                        r"\bcustoms?\b",
                        r"\bbeliefs\b",
                    ],
                ),
                category(
                    "cultural_dimensions",
                    "cultural_dimensions_awareness",
                    &[
                        r"\bpower distance\b",
                        r"\bindividualism\b",
                        r"\bcollectivism\b",
                        r"\buncertainty avoidance\b",
                        r"\b(?:high|low)[- ]context\b",
                        r"\bcultural dimensions?\b",
                    ],
                ),
                category(
                    "cultural_frameworks",
                    "framework_knowledge",
                    &[
                        r"\bhofstede\b",
                        r"\btrompenaars\b",
                        r"\bcultural frameworks?\b",
                        r"\bglobe study\b",
                        r"\blewis model\b",
                    ],
                ),
                category(
                    "cultural_self_awareness",
                    "cultural_self_awareness",
                    &[
                        r"\bmy cultural lens\b",
                        r"\bmy (?:own )?culture\b",
                        r"\bin my culture\b",
                        r"\bmy (?:own )?background\b",
                    ],
                ),
            ],
        ),
        (
            CompetenceDimension::CulturalSensitivity,
            vec![
                category(
                    "respectful_language",
                    "respectful_communication",
                    &[
                        r"\brespectful(?:ly)?\b",
                        r"\brespecting\b",
                        r"\bhonou?r\b",
                        r"\bappreciate\b",
                        r"\backnowledge\b",
                        r"\bcherish\b",
                    ],
                ),
                category(
                    "inclusive_language",
                    "inclusive_communication",
                    &[
                        r"\bdiverse (?:perspectives|viewpoints|team|backgrounds)\b",
                        r"\beveryone\b",
                        r"\binclusive\b",
                        r"\bdifferent viewpoints\b",
                        r"\bunique backgrounds?\b",
                    ],
                ),
                category(
                    "avoiding_stereotypes",
                    "stereotype_avoidance",
                    &[
                        r"\brather than (?:making )?assum",
                        r"\bavoid(?:ing)? generaliz",
                        r"\bstereotyp",
                        r"\bnot all\b",
                        r"\bvar(?:y|ies) greatly\b",
                    ],
                ),
                category(
                    "cultural_humility",
                    "cultural_humility",
                    &[
                        r"\b(?:don't|do not) fully understand\b",
                        r"\bopen to learning\b",
                        r"\bi may be wrong\b",
                        r"\bembrac(?:e|ing)\b",
                        r"\bstill have (?:a lot|much) to learn\b",
                    ],
                ),
            ],
        ),
        (
            CompetenceDimension::CrossCulturalCommunication,
            vec![
                category(
                    "clarification_seeking",
                    "clarification_competence",
                    &[
                        r"\bhelp me understand\b",
                        r"\bcould you (?:explain|clarify)\b",
                        r"\bwhat (?:do )?you mean\b",
                        r"\bcheck my understanding\b",
                        r"\bsame page\b",
                    ],
                ),
                category(
                    "perspective_taking",
                    "perspective_taking_skill",
                    &[
                        r"\bfrom your (?:cultural )?perspective\b",
                        r"\byour (?:point of view|viewpoint)\b",
                        r"\bhow do you see\b",
                        r"\bin your experience\b",
                        r"\bunderstand (?:your|each person's|their) perspective\b",
                    ],
                ),
                category(
                    "cultural_translation",
                    "translation_competence",
                    &[
                        r"\bin my culture\b",
                        r"\bthe equivalent\b",
                        r"\bin other words\b",
                        r"\bcomparable\b",
                    ],
                ),
                category(
                    "code_switching",
                    "adaptive_communication",
                    &[
                        r"\badapt my communication\b",
                        r"\bcommunication style\b",
                        r"\badjust(?:ing)? my (?:tone|language|style)\b",
                        r"\bmore (?:directly|indirectly)\b",
                        r"\baddress concerns directly\b",
                    ],
                ),
            ],
        ),
        (
            CompetenceDimension::AdaptationSkills,
            vec![
                category(
                    "behavioral_adaptation",
                    "adaptive_behavior",
                    &[
                        r"\badapt(?:s|ed|ing)?\b",
                        r"\badjust(?:s|ed|ing)?\b",
                        r"\bflexib(?:le|ility)\b",
                        r"\bmodify\b",
                        r"\badaptable\b",
                    ],
                ),
                category(
                    "learning_orientation",
                    "continuous_learning",
                    &[
                        r"\bstill learning\b",
                        r"\blearn(?:ing)? from\b",
                        r"\bobserv(?:e|ing)\b",
                        r"\bopen to learning\b",
                        r"\bcurious\b",
                    ],
                ),
                category(
                    "ambiguity_tolerance",
                    "ambiguity_tolerance",
                    &[
                        r"\buncomfortable\b",
                        r"\bcomfort zone\b",
                        r"\buncertain(?:ty)?\b",
                        r"\bunfamiliar\b",
                        r"\bambigu",
                    ],
                ),
                category(
                    "cultural_resilience",
                    "cultural_resilience",
                    &[
                        r"\bkeep trying\b",
                        r"\bmistakes?\b",
                        r"\bdetermined\b",
                        r"\bpersever",
                        r"\bbounce back\b",
                    ],
                ),
            ],
        ),
        (
            CompetenceDimension::GlobalMindset,
            vec![
                category(
                    "global_perspective",
                    "global_perspective",
                    &[
                        r"\bglobal\b",
                        r"\bworldwide\b",
                        r"\binternational\b",
                        r"\binterconnected\b",
                        r"\bshared humanity\b",
                    ],
                ),
                category(
                    "systems_thinking",
                    "systems_thinking",
                    &[
                        r"\bsystems thinking\b",
                        r"\bripple effects?\b",
                        r"\bmultiple factors\b",
                        r"\binterdependen",
                        r"\bsystemic\b",
                    ],
                ),
                category(
                    "complexity_appreciation",
                    "nuanced_thinking",
                    &[
                        r"\bcomplex(?:ity)?\b",
                        r"\bnuanc",
                        r"\bmultiple perspectives\b",
                        r"\bit depends\b",
                    ],
                ),
                category(
                    "long_term_orientation",
                    "forward_thinking",
                    &[
                        r"\blong[- ]term\b",
                        r"\bfuture generations\b",
                        r"\bsustainab",
                    ],
                ),
            ],
        ),
        (
            CompetenceDimension::InterculturalEmpathy,
            vec![
                category(
                    "emotional_understanding",
                    "emotional_intelligence",
                    &[
                        r"\bi can imagine\b",
                        r"\bmust (?:feel|be)\b",
                        r"\bempathi[sz]e\b",
                        r"\bunderstand the emotion",
                        r"\bhow (?:difficult|hard) this\b",
                    ],
                ),
                category(
                    "validation",
                    "validating_empathy",
                    &[
                        r"\b(?:completely )?understandable\b",
                        r"\bmakes sense\b",
                        r"\byour (?:reaction|feelings?) (?:is|are)\b",
                        r"\bvalid\b",
                    ],
                ),
                category(
                    "shared_humanity",
                    "universal_empathy",
                    &[
                        r"\bwe all\b",
                        r"\bshared humanity\b",
                        r"\buniversal human\b",
                        r"\bsimilar struggles\b",
                        r"\bhuman experience\b",
                    ],
                ),
                category(
                    "contextual_understanding",
                    "contextual_empathy",
                    &[
                        r"\bgiven your background\b",
                        r"\bcultural context\b",
                        r"\b(?:where )?you're coming from\b",
                        r"\byour situation\b",
                    ],
                ),
            ],
        ),
        (
            CompetenceDimension::CulturalBridgeBuilding,
            vec![
                category(
                    "finding_commonalities",
                    "commonality_identification",
                    &[
                        r"\bcommon ground\b",
                        r"\bshared (?:values|objectives|goals)\b",
                        r"\bsimilar experiences\b",
                        r"\bin common\b",
                    ],
                ),
                category(
                    "cultural_translation",
                    "cultural_translation",
                    &[
                        r"\bin other words\b",
                        r"\bthink of it like\b",
                        r"\bcomparable\b",
                        r"\bexplain this\b",
                    ],
                ),
                category(
                    "cultural_mediation",
                    "cultural_mediation",
                    &[
                        r"\bmiddle ground\b",
                        r"\bbridg(?:e|es|ing)\b",
                        r"\bbetween different perspectives\b",
                        r"\bboth sides\b",
                    ],
                ),
                category(
                    "cultural_synthesis",
                    "cultural_synthesis",
                    &[
                        r"\bhybrid\b",
                        r"\bcombin(?:e|es|ing) the best\b",
                        r"\bbest of both\b",
                    ],
                ),
            ],
        ),
        (
            CompetenceDimension::BiasAwarenessMitigation,
            vec![
                category(
                    "bias_recognition",
                    "bias_awareness",
                    &[
                        r"\bbias(?:es)?\b",
                        r"\bpreconceived\b",
                        r"\bprejudic",
                        r"\bblind spots?\b",
                    ],
                ),
                category(
                    "self_reflection",
                    "self_reflection",
                    &[
                        r"\bcheck my assumptions\b",
                        r"\bquestion my\b",
                        r"\bexamine my\b",
                        r"\bmy (?:own )?assumptions?\b",
                        r"\breflect on\b",
                    ],
                ),
                category(
                    "bias_mitigation",
                    "bias_correction",
                    &[
                        r"\bmore objective\b",
                        r"\bseek(?:ing)? different perspectives\b",
                        r"\bgather(?:ing)? more information\b",
                        r"\bbefore drawing conclusions\b",
                    ],
                ),
            ],
        ),
    ]
});

// ---------------------------------------------------------------------------
// Assessor
// ---------------------------------------------------------------------------

/// Pattern-driven intercultural competence evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterculturalCompetenceAssessor;

impl InterculturalCompetenceAssessor {
    pub const VERSION: &'static str = "1.0.0";

    pub fn new() -> Self {
        Self
    }

    /// Wrap in a [`MultiDimensionalEvaluator`] to evaluate every dimension.
    pub fn into_runner(self) -> MultiDimensionalEvaluator<Self> {
        MultiDimensionalEvaluator::new(self)
    }

    /// Score one dimension.
    ///
    /// Unknown dimension names yield an all-zero dimension whose evidence
    /// names the problem.
    pub fn assess(
        &self,
        dimension: &str,
        response_text: &str,
        context: &CulturalContext,
    ) -> EvaluationDimension {
        match self.try_assess(dimension, response_text, context) {
            Ok(result) => result,
            Err(err) => {
                tracing::debug!(dimension = %dimension, error = %err, "dimension not assessed");
                EvaluationDimension::zeroed(dimension, format!("Unknown dimension: {dimension}"))
            }
        }
    }

    fn try_assess(
        &self,
        dimension: &str,
        response_text: &str,
        context: &CulturalContext,
    ) -> AnalysisResult<EvaluationDimension> {
        let competence = CompetenceDimension::parse(dimension)
            .ok_or_else(|| AnalysisError::UnknownDimension(dimension.to_string()))?;
        let categories = PATTERN_TABLES
            .iter()
            .find(|(d, _)| *d == competence)
            .map(|(_, categories)| categories)
            .ok_or_else(|| AnalysisError::UnknownDimension(dimension.to_string()))?;

        let text = response_text.to_lowercase();
        let mut score = 0.0;
        let mut total_hits = 0usize;
        let mut evidence = Vec::new();
        let mut markers = Vec::new();

        for category in categories {
            let matched: Vec<&str> = category
                .patterns
                .iter()
                .flat_map(|p| p.find_iter(&text).map(|m| m.as_str()))
                .collect();
            if matched.is_empty() {
                continue;
            }
            total_hits += matched.len();
            score += category_contribution(matched.len());
            evidence.push(format!("{}: {}", category.name, matched.join(", ")));
            markers.push(category.marker.to_string());
        }

        if context.group_count() > 1 {
            if let Some(marker) = competence.multicultural_marker() {
                score += MULTICULTURAL_BONUS;
                markers.push(marker.to_string());
                evidence.push(format!(
                    "multicultural context: {} cultural groups",
                    context.group_count()
                ));
            }
        }

        let confidence = (total_hits as f64 * CONFIDENCE_PER_HIT).min(1.0);
        let relevance = cultural_relevance(&markers, context);
        Ok(EvaluationDimension::new(
            dimension, score, confidence, relevance, evidence, markers,
        ))
    }
}

impl DimensionEvaluator for InterculturalCompetenceAssessor {
    fn domain_name(&self) -> &str {
        "intercultural_competence"
    }

    fn supported_evaluation_types(&self) -> &[&'static str] {
        SUPPORTED_TYPES
    }

    fn dimension_names(&self) -> &[&'static str] {
        DIMENSION_NAMES
    }

    fn version(&self) -> &str {
        Self::VERSION
    }

    fn evaluate_dimension(
        &self,
        dimension: &str,
        response_text: &str,
        _metadata: &TestMetadata,
        context: &CulturalContext,
    ) -> AnalysisResult<EvaluationDimension> {
        Ok(self.assess(dimension, response_text, context))
    }
}

/// Saturating per-category contribution: `cap × (1 − decay^hits)`.
fn category_contribution(hits: usize) -> f64 {
    CATEGORY_CAP * (1.0 - CATEGORY_DECAY.powi(hits as i32))
}

/// Relevance of the fired markers to cultural competence.
///
/// No markers means unknown (0.5). Multicultural, intercultural or global
/// markers rank highest, then general cultural and bias markers. Contexts
/// with several groups add up to 0.1.
pub fn cultural_relevance(markers: &[String], context: &CulturalContext) -> f64 {
    if markers.is_empty() {
        return 0.5;
    }
    let any = |needles: &[&str]| markers.iter().any(|m| needles.iter().any(|n| m.contains(n)));

    let mut relevance = if any(&["multicultural", "intercultural", "global"]) {
        0.85
    } else if any(&["cultural", "empathy", "adaptation", "bias", "stereotype", "assumption"]) {
        0.75
    } else {
        0.6
    };
    relevance += 0.05 * context.group_count().saturating_sub(1).min(2) as f64;
    relevance.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multicultural() -> CulturalContext {
        CulturalContext {
            cultural_groups: vec!["japanese".into(), "american".into(), "brazilian".into()],
            ..Default::default()
        }
    }

    fn single_culture() -> CulturalContext {
        CulturalContext {
            cultural_groups: vec!["japanese".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_dimension_is_zeroed() {
        let d = InterculturalCompetenceAssessor::new().assess("made_up", "text", &multicultural());
        assert_eq!(d.score, 0.0);
        assert_eq!(d.confidence, 0.0);
        assert_eq!(d.cultural_relevance, 0.0);
        assert!(d.evidence[0].contains("Unknown dimension"));
    }

    #[test]
    fn test_sensitivity_markers() {
        let d = InterculturalCompetenceAssessor::new().assess(
            "cultural_sensitivity",
            "I want to respectfully acknowledge the diverse perspectives in our team.",
            &multicultural(),
        );
        assert!(d.score > 0.0);
        assert!(d.cultural_markers.contains(&"respectful_communication".to_string()));
        assert!(d.evidence.iter().any(|e| e.starts_with("respectful_language")));
    }

    #[test]
    fn test_case_insensitive() {
        let d = InterculturalCompetenceAssessor::new().assess(
            "cultural_sensitivity",
            "I NEED TO RESPECTFULLY ACKNOWLEDGE DIVERSE PERSPECTIVES AND AVOID GENERALIZING",
            &CulturalContext::default(),
        );
        assert!(d.score > 0.0);
        assert!(!d.evidence.is_empty());
    }

    #[test]
    fn test_neutral_text_scores_low() {
        let d = InterculturalCompetenceAssessor::new().assess(
            "cultural_sensitivity",
            "This is a neutral statement without cultural competence indicators.",
            &multicultural(),
        );
        assert!(d.score <= 0.1);
        assert!(d.confidence <= 0.1);
    }

    #[test]
    fn test_empty_text_only_gets_bonus() {
        let d = InterculturalCompetenceAssessor::new().assess("cultural_awareness", "", &multicultural());
        assert!(d.score <= 0.15);
        assert_eq!(d.confidence, 0.0);
        assert!(d.cultural_markers.contains(&"multicultural_awareness".to_string()));
    }

    #[test]
    fn test_multicultural_bonus_for_bridge_building() {
        let text = "Despite our differences, we have common ground in our shared values. \
                    By finding middle ground we can create a hybrid solution.";
        let assessor = InterculturalCompetenceAssessor::new();
        let single = assessor.assess("cultural_bridge_building", text, &single_culture());
        let multi = assessor.assess("cultural_bridge_building", text, &multicultural());
        assert!(multi.score > single.score);
        assert!(multi.cultural_relevance > single.cultural_relevance);
        assert!(multi.cultural_markers.contains(&"multicultural_bridging".to_string()));
    }

    #[test]
    fn test_relevance_levels() {
        let context = multicultural();
        assert_eq!(cultural_relevance(&[], &context), 0.5);
        let multi = vec!["multicultural_awareness".to_string()];
        assert!(cultural_relevance(&multi, &context) > 0.8);
        let general = vec!["cultural_knowledge".to_string()];
        assert!(cultural_relevance(&general, &single_culture()) > 0.7);
        let bias = vec!["bias_awareness".to_string(), "stereotype_avoidance".to_string()];
        assert!(cultural_relevance(&bias, &context) > 0.7);
    }

    #[test]
    fn test_category_contribution_saturates() {
        assert_eq!(category_contribution(0), 0.0);
        assert!(category_contribution(1) < category_contribution(2));
        assert!(category_contribution(50) <= CATEGORY_CAP);
    }

    #[test]
    fn test_runner_evaluates_all_dimensions() {
        let runner = InterculturalCompetenceAssessor::new().into_runner();
        let result = runner.evaluate(
            "I respectfully acknowledge your perspective and look for common ground.",
            &TestMetadata::default(),
            &multicultural(),
        );
        assert_eq!(result.domain, "intercultural_competence");
        assert_eq!(result.dimensions.len(), 8);
        assert!(result.overall_score > 0.0);
    }
}
