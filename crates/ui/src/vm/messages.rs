use services::{ApiError, ExamFlowError};

pub const MISSING_CONFIG_REDIRECT: &str =
    "Brak konfiguracji egzaminu. Przekierowuję do strony głównej...";
pub const CORRUPT_CONFIG_REDIRECT: &str =
    "Nieprawidłowa konfiguracja egzaminu. Przekierowuję do strony głównej...";
pub const CLIPBOARD_ERROR: &str = "Nie udało się skopiować do schowka";

/// User-facing text for a failed exam operation.
#[must_use]
pub fn flow_error_message(error: &ExamFlowError) -> String {
    match error {
        ExamFlowError::EmptyAnswer => "Wpisz odpowiedź przed sprawdzeniem.".to_string(),
        ExamFlowError::AnswerRejected { explanation } => match explanation {
            Some(explanation) => format!("Odpowiedź niezgodna z zasadami: {explanation}"),
            None => "Odpowiedź niezgodna z zasadami egzaminu.".to_string(),
        },
        ExamFlowError::NoQuestions => {
            "Serwer nie zwrócił żadnych pytań. Spróbuj ponownie.".to_string()
        }
        ExamFlowError::PhaseMismatch => {
            "Ta operacja nie jest dostępna w bieżącym kroku egzaminu.".to_string()
        }
        ExamFlowError::Api(api) => api_error_message(api),
        ExamFlowError::Session(_) | ExamFlowError::State(_) => {
            "Nie udało się zapisać stanu egzaminu.".to_string()
        }
        _ => "Wystąpił nieoczekiwany błąd. Spróbuj ponownie.".to_string(),
    }
}

fn api_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Timeout => {
            "Przekroczono limit czasu oczekiwania. Sprawdź czy backend działa na porcie 8000."
                .to_string()
        }
        ApiError::Unreachable => {
            "Nie można połączyć się z serwerem. Sprawdź czy backend działa.".to_string()
        }
        ApiError::Http { status, .. } => {
            format!("Serwer zwrócił błąd (kod {}).", status.as_u16())
        }
        ApiError::Malformed(_) => "Serwer zwrócił niepoprawną odpowiedź.".to_string(),
        _ => "Błąd połączenia z serwerem.".to_string(),
    }
}
