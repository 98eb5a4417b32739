// src/common/i18n.rs

use std::collections::HashMap;

const DEFAULT_LANG: &str = "en";

const EN: &[(&str, &str)] = &[
    ("validation_failed", "One or more fields are invalid."),
    ("room_not_found", "Room not found."),
    ("booking_not_found", "Booking not found."),
    ("checkin_in_past", "Check-in date cannot be in the past."),
    ("invalid_checkout", "Check-out must be after check-in."),
    ("invalid_rate", "The room has an invalid daily price."),
    ("extra_hours_conflict", "Late checkout overlaps another reservation."),
    ("extra_hours_at_minimum", "There are no extra hours to remove."),
    ("booking_conflict", "The selected period overlaps an existing reservation."),
    ("zero_price", "The booking total cannot be zero."),
    ("invalid_status_transition", "This status change is not allowed."),
    ("booking_failed", "Booking failed. Please try again."),
    ("internal_error", "An unexpected error occurred."),
    ("limit_range", "Limit must be between 1 and 100."),
    ("offset_range", "Offset cannot be negative."),
    ("invalid_query", "Invalid query parameters."),
    ("extra_hours_range", "Extra hours cannot exceed 720."),
];

const PT: &[(&str, &str)] = &[
    ("validation_failed", "Um ou mais campos são inválidos."),
    ("room_not_found", "Quarto não encontrado."),
    ("booking_not_found", "Reserva não encontrada."),
    ("checkin_in_past", "A data de check-in não pode estar no passado."),
    ("invalid_checkout", "O checkout deve ser posterior ao check-in."),
    ("invalid_rate", "O quarto possui um preço diário inválido."),
    ("extra_hours_conflict", "O checkout tardio conflita com outra reserva."),
    ("extra_hours_at_minimum", "Não há horas extras para remover."),
    ("booking_conflict", "O período selecionado conflita com uma reserva existente."),
    ("zero_price", "O total da reserva não pode ser zero."),
    ("invalid_status_transition", "Esta mudança de status não é permitida."),
    ("booking_failed", "Falha ao reservar. Tente novamente."),
    ("internal_error", "Ocorreu um erro inesperado."),
    ("limit_range", "O limite deve estar entre 1 e 100."),
    ("offset_range", "O deslocamento não pode ser negativo."),
    ("invalid_query", "Parâmetros de consulta inválidos."),
    ("extra_hours_range", "As horas extras não podem passar de 720."),
];

/// Catálogo de mensagens por idioma. Idiomas desconhecidos caem no inglês.
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert("en", EN.iter().copied().collect());
        catalogs.insert("pt", PT.iter().copied().collect());
        Self { catalogs }
    }

    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.lookup(lang, key)
            .or_else(|| self.lookup(DEFAULT_LANG, key))
            .map(str::to_string)
            // Chave sem tradução: devolve a própria chave
            .unwrap_or_else(|| key.to_string())
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&'static str> {
        self.catalogs.get(lang).and_then(|c| c.get(key)).copied()
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
