//! Room validation.

use std::collections::{HashMap, HashSet};

use greatescape_core::error::DomainError;
use thiserror::Error;

use super::candidate::{HotspotCandidate, RoomCandidate};
use super::definition::{Atmosphere, Hotspot, Placement, RoomDefinition, RoomMode, VisualRef};

/// Number of options every quiz offers.
pub const QUIZ_OPTION_COUNT: usize = 4;

const DEFAULT_AMBIENT_COLOR: &str = "#8b5cf6";
const DEFAULT_HOTSPOT_ICON: &str = "🔍";

/// Reasons a candidate room is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A mandatory text field is missing or blank.
    #[error("room is missing required field `{0}`")]
    MissingField(&'static str),

    /// The room has no hotspots.
    #[error("room must contain at least one hotspot")]
    NoHotspots,

    /// A hotspot has a blank id.
    #[error("hotspot #{0} has no id")]
    UnnamedHotspot(usize),

    /// Two hotspots share an id.
    #[error("duplicate hotspot id `{0}`")]
    DuplicateHotspot(String),

    /// The room has no quiz.
    #[error("room has no quiz")]
    MissingQuiz,

    /// The quiz does not offer the expected number of options.
    #[error("quiz must offer exactly {expected} options, found {found}")]
    OptionCount {
        /// Expected option count.
        expected: usize,
        /// Actual option count.
        found: usize,
    },

    /// The answer key is not among the options.
    #[error("quiz options do not contain the correct answer `{0}`")]
    AnswerNotOffered(String),

    /// The answer key appears more than once among the options.
    #[error("quiz options contain the correct answer `{0}` more than once")]
    AnswerRepeated(String),

    /// A hotspot requires a hotspot that does not exist.
    #[error("hotspot `{hotspot}` requires unknown hotspot `{required}`")]
    DanglingRequirement {
        /// The dependent hotspot.
        hotspot: String,
        /// The missing prerequisite.
        required: String,
    },

    /// The `required` relation loops back on itself.
    #[error("hotspot requirements form a cycle: {}", .0.join(" -> "))]
    RequirementCycle(Vec<String>),
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Validates a candidate and normalises it into a [`RoomDefinition`].
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, checking identity fields,
/// hotspots, the quiz, and finally the `required` dependency graph.
pub fn validate(mut candidate: RoomCandidate) -> Result<RoomDefinition, ValidationError> {
    normalize_hotspot_refs(&mut candidate.hotspots);
    let id = non_blank(candidate.id.as_deref()).ok_or(ValidationError::MissingField("id"))?;
    let name = non_blank(Some(&candidate.name)).ok_or(ValidationError::MissingField("name"))?;

    if candidate.hotspots.is_empty() {
        return Err(ValidationError::NoHotspots);
    }
    check_hotspot_ids(&candidate.hotspots)?;

    let quiz = candidate.quiz.ok_or(ValidationError::MissingQuiz)?;
    if quiz.question.trim().is_empty() {
        return Err(ValidationError::MissingField("quiz.question"));
    }
    if quiz.options.len() != QUIZ_OPTION_COUNT {
        return Err(ValidationError::OptionCount {
            expected: QUIZ_OPTION_COUNT,
            found: quiz.options.len(),
        });
    }
    match quiz
        .options
        .iter()
        .filter(|option| **option == quiz.correct_answer)
        .count()
    {
        0 => return Err(ValidationError::AnswerNotOffered(quiz.correct_answer)),
        1 => {}
        _ => return Err(ValidationError::AnswerRepeated(quiz.correct_answer)),
    }

    check_requirements(&candidate.hotspots)?;

    let hotspots: Vec<Hotspot> = candidate.hotspots.into_iter().map(into_hotspot).collect();
    let mode = candidate.mode.unwrap_or_else(|| infer_mode(&hotspots));

    Ok(RoomDefinition {
        id: id.to_owned(),
        name: name.to_owned(),
        objective: candidate.objective.trim().to_owned(),
        atmosphere: candidate
            .atmosphere
            .as_deref()
            .map(Atmosphere::from_label)
            .unwrap_or_default(),
        ambient_color: non_blank(candidate.ambient_color.as_deref())
            .unwrap_or(DEFAULT_AMBIENT_COLOR)
            .to_owned(),
        mode,
        background: non_blank(candidate.background.as_deref())
            .map(|url| VisualRef::Fallback { url: url.to_owned() }),
        visually_upgraded: false,
        quiz,
        hints: candidate
            .hints
            .into_iter()
            .filter(|hint| !hint.trim().is_empty())
            .collect(),
        hotspots,
        listing: candidate.listing,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Trims hotspot ids and `required` links so the graph checks see the
/// same identifiers the definition will store. A blank link means none.
fn normalize_hotspot_refs(hotspots: &mut [HotspotCandidate]) {
    for hotspot in hotspots {
        hotspot.id = hotspot.id.trim().to_owned();
        hotspot.required = hotspot
            .required
            .take()
            .map(|required| required.trim().to_owned())
            .filter(|required| !required.is_empty());
    }
}

fn check_hotspot_ids(hotspots: &[HotspotCandidate]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (index, hotspot) in hotspots.iter().enumerate() {
        if hotspot.id.trim().is_empty() {
            return Err(ValidationError::UnnamedHotspot(index));
        }
        if !seen.insert(hotspot.id.as_str()) {
            return Err(ValidationError::DuplicateHotspot(hotspot.id.clone()));
        }
    }
    Ok(())
}

/// Each hotspot has at most one prerequisite, so the graph is a set of
/// chains; a cycle exists iff following `required` from some hotspot
/// revisits a hotspot on the same walk.
fn check_requirements(hotspots: &[HotspotCandidate]) -> Result<(), ValidationError> {
    let edges: HashMap<&str, Option<&str>> = hotspots
        .iter()
        .map(|h| (h.id.as_str(), h.required.as_deref()))
        .collect();

    for hotspot in hotspots {
        if let Some(required) = hotspot.required.as_deref() {
            if !edges.contains_key(required) {
                return Err(ValidationError::DanglingRequirement {
                    hotspot: hotspot.id.clone(),
                    required: required.to_owned(),
                });
            }
        }
    }

    let mut acyclic: HashSet<&str> = HashSet::new();
    for hotspot in hotspots {
        let mut path: Vec<&str> = Vec::new();
        let mut current = Some(hotspot.id.as_str());
        while let Some(id) = current {
            if acyclic.contains(id) {
                break;
            }
            if let Some(start) = path.iter().position(|visited| *visited == id) {
                let mut cycle: Vec<String> = path[start..].iter().map(|s| (*s).to_owned()).collect();
                cycle.push(id.to_owned());
                return Err(ValidationError::RequirementCycle(cycle));
            }
            path.push(id);
            current = edges.get(id).copied().flatten();
        }
        acyclic.extend(path);
    }
    Ok(())
}

fn into_hotspot(candidate: HotspotCandidate) -> Hotspot {
    let placement = candidate.placement();
    Hotspot {
        id: candidate.id,
        label: candidate.label,
        icon: candidate
            .icon
            .filter(|icon| !icon.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOTSPOT_ICON.to_owned()),
        clue: candidate.clue.filter(|clue| !clue.trim().is_empty()),
        description: candidate.description,
        collectible: candidate.collectible,
        is_exit: candidate.is_exit,
        is_misleading: candidate.is_misleading,
        required: candidate.required,
        glow_color: candidate.glow_color,
        placement,
        thumbnail: None,
    }
}

fn infer_mode(hotspots: &[Hotspot]) -> RoomMode {
    if hotspots
        .iter()
        .any(|h| matches!(h.placement, Placement::Spatial { .. }))
    {
        RoomMode::Scene3d
    } else {
        RoomMode::Flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::definition::Quiz;

    fn hotspot(id: &str, required: Option<&str>) -> HotspotCandidate {
        HotspotCandidate {
            id: id.to_owned(),
            label: id.to_uppercase(),
            clue: Some(format!("clue from {id}")),
            required: required.map(str::to_owned),
            ..HotspotCandidate::default()
        }
    }

    fn candidate(hotspots: Vec<HotspotCandidate>) -> RoomCandidate {
        RoomCandidate {
            id: Some("study".to_owned()),
            name: "The Study".to_owned(),
            objective: "Find the year".to_owned(),
            atmosphere: Some("Warm".to_owned()),
            quiz: Some(Quiz {
                question: "Which year?".to_owned(),
                correct_answer: "1874".to_owned(),
                options: vec![
                    "1868".to_owned(),
                    "1874".to_owned(),
                    "1881".to_owned(),
                    "1899".to_owned(),
                ],
            }),
            hints: vec!["look".to_owned(), "  ".to_owned(), "closer".to_owned()],
            hotspots,
            ..RoomCandidate::default()
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_room() {
        // Arrange
        let input = candidate(vec![hotspot("a", None), hotspot("b", Some("a"))]);

        // Act
        let room = validate(input).unwrap();

        // Assert
        assert_eq!(room.id(), "study");
        assert_eq!(room.atmosphere(), Atmosphere::Warm);
        assert_eq!(room.mode(), RoomMode::Flat);
        assert_eq!(room.hints(), ["look".to_owned(), "closer".to_owned()]);
        assert_eq!(room.hotspots().len(), 2);
        assert_eq!(room.hotspot("b").unwrap().required.as_deref(), Some("a"));
        assert!(!room.visually_upgraded());
        assert!(room.background().is_none());
    }

    #[test]
    fn test_validate_rejects_room_without_hotspots() {
        assert_eq!(
            validate(candidate(vec![])).unwrap_err(),
            ValidationError::NoHotspots
        );
    }

    #[test]
    fn test_validate_rejects_missing_quiz() {
        let mut input = candidate(vec![hotspot("a", None)]);
        input.quiz = None;

        assert_eq!(validate(input).unwrap_err(), ValidationError::MissingQuiz);
    }

    #[test]
    fn test_validate_rejects_answer_not_offered() {
        let mut input = candidate(vec![hotspot("a", None)]);
        if let Some(quiz) = input.quiz.as_mut() {
            quiz.correct_answer = "1900".to_owned();
        }

        assert_eq!(
            validate(input).unwrap_err(),
            ValidationError::AnswerNotOffered("1900".to_owned())
        );
    }

    #[test]
    fn test_validate_rejects_repeated_answer() {
        let mut input = candidate(vec![hotspot("a", None)]);
        if let Some(quiz) = input.quiz.as_mut() {
            quiz.options[0] = "1874".to_owned();
        }

        assert_eq!(
            validate(input).unwrap_err(),
            ValidationError::AnswerRepeated("1874".to_owned())
        );
    }

    #[test]
    fn test_validate_rejects_wrong_option_count() {
        let mut input = candidate(vec![hotspot("a", None)]);
        if let Some(quiz) = input.quiz.as_mut() {
            quiz.options.pop();
        }

        assert_eq!(
            validate(input).unwrap_err(),
            ValidationError::OptionCount {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_validate_rejects_dangling_requirement() {
        let input = candidate(vec![hotspot("a", Some("ghost"))]);

        assert_eq!(
            validate(input).unwrap_err(),
            ValidationError::DanglingRequirement {
                hotspot: "a".to_owned(),
                required: "ghost".to_owned(),
            }
        );
    }

    #[test]
    fn test_validate_rejects_requirement_cycle() {
        let input = candidate(vec![
            hotspot("root", None),
            hotspot("a", Some("c")),
            hotspot("b", Some("a")),
            hotspot("c", Some("b")),
        ]);

        match validate(input).unwrap_err() {
            ValidationError::RequirementCycle(path) => {
                assert_eq!(path.first(), path.last());
                assert_eq!(path.len(), 4);
            }
            other => panic!("expected RequirementCycle, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_self_requirement() {
        let input = candidate(vec![hotspot("a", Some("a"))]);

        assert_eq!(
            validate(input).unwrap_err(),
            ValidationError::RequirementCycle(vec!["a".to_owned(), "a".to_owned()])
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_hotspot_ids() {
        let input = candidate(vec![hotspot("a", None), hotspot("a", None)]);

        assert_eq!(
            validate(input).unwrap_err(),
            ValidationError::DuplicateHotspot("a".to_owned())
        );
    }

    #[test]
    fn test_validate_rejects_ids_that_differ_only_by_whitespace() {
        let input = candidate(vec![hotspot("key", None), hotspot("key ", None)]);

        assert_eq!(
            validate(input).unwrap_err(),
            ValidationError::DuplicateHotspot("key".to_owned())
        );
    }

    #[test]
    fn test_validate_trims_requirement_links() {
        // Arrange
        let input = candidate(vec![
            hotspot(" key", None),
            hotspot("box", Some(" key ")),
            hotspot("door", Some("  ")),
        ]);

        // Act
        let room = validate(input).unwrap();

        // Assert
        assert_eq!(room.hotspots()[0].id, "key");
        assert_eq!(room.hotspots()[1].required.as_deref(), Some("key"));
        assert_eq!(room.hotspots()[2].required, None);
    }

    #[test]
    fn test_validate_requires_id() {
        let mut input = candidate(vec![hotspot("a", None)]);
        input.id = Some("   ".to_owned());

        assert_eq!(
            validate(input).unwrap_err(),
            ValidationError::MissingField("id")
        );
    }

    #[test]
    fn test_validate_infers_scene_mode_and_drops_blank_clues() {
        let mut spatial = hotspot("orb", None);
        spatial.position = Some([0.0, 1.0, -2.0]);
        spatial.clue = Some(String::new());

        let room = validate(candidate(vec![spatial])).unwrap();

        assert_eq!(room.mode(), RoomMode::Scene3d);
        assert!(room.hotspot("orb").unwrap().clue.is_none());
    }

    #[test]
    fn test_validation_error_converts_to_domain_error() {
        let err: DomainError = ValidationError::NoHotspots.into();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("hotspot")));
    }
}
