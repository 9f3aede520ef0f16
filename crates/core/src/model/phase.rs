/// The exam runner's linear phase machine.
///
/// `welcome → question → checked → (lesson →)? question …` until the last
/// question is advanced past, then `summary` (terminal). Persisted as a raw
/// string so reloads resume in the same phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamPhase {
    Welcome,
    Question,
    Checked,
    Lesson,
    Summary,
}

impl ExamPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Question => "question",
            Self::Checked => "checked",
            Self::Lesson => "lesson",
            Self::Summary => "summary",
        }
    }

    /// Parses a persisted phase string. Unknown values restore as `None`;
    /// callers fall back to `Welcome`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "welcome" => Some(Self::Welcome),
            "question" => Some(Self::Question),
            "checked" => Some(Self::Checked),
            "lesson" => Some(Self::Lesson),
            "summary" => Some(Self::Summary),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExamPhase;

    #[test]
    fn phase_strings_round_trip() {
        for phase in [
            ExamPhase::Welcome,
            ExamPhase::Question,
            ExamPhase::Checked,
            ExamPhase::Lesson,
            ExamPhase::Summary,
        ] {
            assert_eq!(ExamPhase::parse(phase.as_str()), Some(phase));
        }
    }

    #[test]
    fn unknown_phase_does_not_parse() {
        assert_eq!(ExamPhase::parse("grading"), None);
        assert_eq!(ExamPhase::parse(""), None);
    }
}
