use exam_core::model::{ExamSummary, LessonData};

/// Markdown document for the "Kopiuj .md" button on a lesson.
#[must_use]
pub fn lesson_markdown(question: &str, lesson: &LessonData) -> String {
    let concepts = lesson
        .key_concepts
        .iter()
        .map(|concept| format!("- {concept}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "# Lekcja - {question}\n\n## Wyjaśnienie\n\n{explanation}\n\n## Kluczowe koncepcje\n\n{concepts}\n\n## Przykład\n\n{example}\n\n## Podsumowanie\n\n{summary}",
        explanation = lesson.explanation,
        example = lesson.example,
        summary = lesson.summary,
    )
}

/// Markdown document for the "Kopiuj .md" button on the final summary.
/// List sections appear only when the backend returned entries for them.
#[must_use]
pub fn summary_markdown(summary: &ExamSummary) -> String {
    let mut output = format!(
        "# Podsumowanie egzaminu\n\nŚrednia ocena: {score:.1}/10\n\n## Ogólna ocena\n\n{overall}\n\n",
        score = summary.average_score,
        overall = summary.summary,
    );

    push_list_section(&mut output, "Mocne strony", &summary.strengths);
    push_list_section(&mut output, "Obszary do poprawy", &summary.improvements);
    push_list_section(&mut output, "Rekomendacje", &summary.recommendations);

    output.trim_end().to_string()
}

fn push_list_section(output: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    output.push_str(&format!("## {heading}\n\n"));
    for item in items {
        output.push_str(&format!("- {item}\n"));
    }
    output.push('\n');
}
