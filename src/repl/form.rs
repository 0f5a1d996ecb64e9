//! Terminal rendition of the prediction form
//!
//! Every field has a range and a default, like sliders on a web form:
//! an empty answer takes the default, an out-of-range answer is asked
//! again. Only the name may be left empty; the transaction rejects that.

use anyhow::Result;
use std::fmt::Display;
use std::str::FromStr;

use crate::model::SymptomRecord;
use crate::prediction::{Gender, Identity};
use crate::repl::display::DisplayManager;
use crate::repl::input::LineSource;

const YES_NO: [&str; 2] = ["Tidak", "Ya"];

/// What the form hands to the prediction transaction
#[derive(Debug, Clone, PartialEq)]
pub struct FormInput {
    pub identity: Identity,
    pub symptoms: SymptomRecord,
}

/// Parse a numeric answer; empty means `default`
pub fn parse_ranged<T>(input: &str, min: T, max: T, default: T) -> Result<T, String>
where
    T: FromStr + PartialOrd + Copy + Display,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }

    let value: T = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| format!("'{}' is not a number", trimmed))?;

    // NaN fails both comparisons
    if !(value >= min && value <= max) {
        return Err(format!("{} is outside {}-{}", value, min, max));
    }
    Ok(value)
}

/// Parse a choice by 1-based number or option text; empty means `default`
pub fn parse_choice(input: &str, options: &[&str], default: usize) -> Result<usize, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }

    if let Ok(n) = trimmed.parse::<usize>() {
        if (1..=options.len()).contains(&n) {
            return Ok(n - 1);
        }
        return Err(format!("choose 1-{}", options.len()));
    }

    options
        .iter()
        .position(|o| o.eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| format!("'{}' is not one of: {}", trimmed, options.join(", ")))
}

/// Parse the final submit confirmation; empty means yes
pub fn parse_confirm(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" | "y" | "ya" | "yes" => Some(true),
        "n" | "t" | "tidak" | "no" => Some(false),
        _ => None,
    }
}

/// Walks the user through the identity and symptom fields
pub struct PredictionForm<'a, S: LineSource + ?Sized> {
    source: &'a mut S,
    display: &'a DisplayManager,
}

impl<'a, S: LineSource + ?Sized> PredictionForm<'a, S> {
    pub fn new(source: &'a mut S, display: &'a DisplayManager) -> Self {
        Self { source, display }
    }

    /// Fill the form
    ///
    /// Returns `None` when input ends or the user declines to submit.
    pub fn fill(&mut self) -> Result<Option<FormInput>> {
        let defaults = SymptomRecord::default();

        self.display.show_section("Identitas Pengguna");
        let Some(name) = self.source.read_field("Nama Lengkap (contoh: unknown): ")? else {
            return Ok(None);
        };
        let gender_labels: Vec<&str> = Gender::ALL.iter().map(Gender::as_str).collect();
        let Some(gender) = self.ask_choice("Jenis Kelamin", None, &gender_labels, 0)? else {
            return Ok(None);
        };
        let Some(age) = self.ask_number("Usia (tahun)", None, 0u32, 120, defaults.age_years)? else {
            return Ok(None);
        };

        self.display.show_section("Gejala yang Dirasakan");
        self.display.show_hint("Pilih atau sesuaikan tingkat gejala yang Anda alami.");

        let Some(body_temperature_c) = self.ask_number(
            "Suhu Tubuh (°C)",
            Some("Suhu tubuh normal berkisar 36.5°C - 37.5°C."),
            35.0f64,
            42.0,
            defaults.body_temperature_c,
        )?
        else {
            return Ok(None);
        };
        let Some(sore_throat) = self.ask_scale(
            "Skala Nyeri Tenggorokan (0-3)",
            "0: Tidak nyeri, 1: Ringan, 2: Sedang, 3: Parah.",
            defaults.sore_throat,
        )?
        else {
            return Ok(None);
        };
        let Some(muscle_pain) = self.ask_scale(
            "Nyeri Otot/Sendi (Skala 0-3)",
            "0: Tidak nyeri, 1: Ringan, 2: Sedang, 3: Parah.",
            defaults.muscle_pain,
        )?
        else {
            return Ok(None);
        };
        let Some(cough_per_hour) = self.ask_number(
            "Frekuensi Batuk (per jam)",
            Some("Perkiraan berapa kali Anda batuk dalam satu jam."),
            0u32,
            50,
            defaults.cough_per_hour,
        )?
        else {
            return Ok(None);
        };
        let Some(breathlessness) = self.ask_scale(
            "Tingkat Sesak Napas (0-3)",
            "0: Tidak sesak, 1: Ringan, 2: Sedang, 3: Berat.",
            defaults.breathlessness,
        )?
        else {
            return Ok(None);
        };
        let Some(headache) = self.ask_scale(
            "Sakit Kepala (Skala 0-3)",
            "0: Tidak sakit, 1: Ringan, 2: Sedang, 3: Parah.",
            defaults.headache,
        )?
        else {
            return Ok(None);
        };
        let Some(illness_days) = self.ask_number(
            "Durasi Sakit (hari)",
            Some("Berapa lama gejala ini sudah Anda rasakan?"),
            0u32,
            30,
            defaults.illness_days,
        )?
        else {
            return Ok(None);
        };
        let Some(appetite_loss) = self.ask_scale(
            "Penurunan Nafsu Makan (Skala 0-3)",
            "0: Tidak ada penurunan, 1: Sedikit, 2: Sedang, 3: Drastis.",
            defaults.appetite_loss,
        )?
        else {
            return Ok(None);
        };
        let Some(contact) = self.ask_choice(
            "Riwayat Kontak dengan Penderita ISPA?",
            Some("Pernahkah Anda berinteraksi dengan orang yang diprediksi ISPA?"),
            &YES_NO,
            0,
        )?
        else {
            return Ok(None);
        };

        if !self.confirm()? {
            return Ok(None);
        }

        Ok(Some(FormInput {
            identity: Identity::new(name, Gender::ALL[gender], age),
            symptoms: SymptomRecord {
                body_temperature_c,
                cough_per_hour,
                sore_throat,
                breathlessness,
                illness_days,
                muscle_pain,
                headache,
                appetite_loss,
                age_years: age,
                prior_contact: contact == 1,
            },
        }))
    }

    fn ask_number<T>(
        &mut self,
        label: &str,
        help: Option<&str>,
        min: T,
        max: T,
        default: T,
    ) -> Result<Option<T>>
    where
        T: FromStr + PartialOrd + Copy + Display,
    {
        if let Some(help) = help {
            self.display.show_hint(help);
        }
        let prompt = format!("{} [{}-{}, default {}]: ", label, min, max, default);
        loop {
            let Some(answer) = self.source.read_field(&prompt)? else {
                return Ok(None);
            };
            match parse_ranged(&answer, min, max, default) {
                Ok(value) => return Ok(Some(value)),
                Err(reason) => self.display.show_warning(&reason),
            }
        }
    }

    fn ask_scale(&mut self, label: &str, help: &str, default: u8) -> Result<Option<u8>> {
        self.ask_number(label, Some(help), 0u8, 3, default)
    }

    fn ask_choice(
        &mut self,
        label: &str,
        help: Option<&str>,
        options: &[&str],
        default: usize,
    ) -> Result<Option<usize>> {
        if let Some(help) = help {
            self.display.show_hint(help);
        }
        let listed: Vec<String> = options
            .iter()
            .enumerate()
            .map(|(i, o)| format!("{}) {}", i + 1, o))
            .collect();
        let prompt = format!("{} [{}, default {}]: ", label, listed.join(" "), options[default]);
        loop {
            let Some(answer) = self.source.read_field(&prompt)? else {
                return Ok(None);
            };
            match parse_choice(&answer, options, default) {
                Ok(index) => return Ok(Some(index)),
                Err(reason) => self.display.show_warning(&reason),
            }
        }
    }

    fn confirm(&mut self) -> Result<bool> {
        loop {
            let Some(answer) = self.source.read_field("Dapatkan prediksi? [Y/n]: ")? else {
                return Ok(false);
            };
            match parse_confirm(&answer) {
                Some(submit) => return Ok(submit),
                None => self.display.show_warning("answer y or n"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::input::ScriptedInput;

    #[test]
    fn test_parse_ranged_default_and_bounds() {
        assert_eq!(parse_ranged("", 35.0, 42.0, 37.0), Ok(37.0));
        assert_eq!(parse_ranged("39,5", 35.0, 42.0, 37.0), Ok(39.5));
        assert_eq!(parse_ranged("42", 35.0, 42.0, 37.0), Ok(42.0));
        assert!(parse_ranged("42.1", 35.0, 42.0, 37.0).is_err());
        assert!(parse_ranged("-1", 0i64, 3, 1).is_err());
        assert!(parse_ranged("abc", 0u32, 50, 10).is_err());
    }

    #[test]
    fn test_parse_ranged_rejects_nan() {
        assert!(parse_ranged("NaN", 35.0, 42.0, 37.0).is_err());
        assert!(parse_ranged("inf", 35.0, 42.0, 37.0).is_err());
        assert!(parse_ranged("-inf", 35.0, 42.0, 37.0).is_err());
    }

    #[test]
    fn test_nan_temperature_is_asked_again() {
        let mut answers = vec!["Ani", "", "", "NaN", "38.5"];
        answers.extend(vec![""; 9]);
        let mut input = ScriptedInput::new(answers);
        let display = DisplayManager::new();
        let form = PredictionForm::new(&mut input, &display).fill().unwrap().unwrap();

        assert_eq!(form.symptoms.body_temperature_c, 38.5);
        let temperature_prompts = input.prompts().iter().filter(|p| p.starts_with("Suhu")).count();
        assert_eq!(temperature_prompts, 2);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_parse_choice() {
        let options = ["Tidak", "Ya"];
        assert_eq!(parse_choice("", &options, 0), Ok(0));
        assert_eq!(parse_choice("2", &options, 0), Ok(1));
        assert_eq!(parse_choice("ya", &options, 0), Ok(1));
        assert!(parse_choice("3", &options, 0).is_err());
        assert!(parse_choice("mungkin", &options, 0).is_err());
    }

    #[test]
    fn test_parse_confirm() {
        assert_eq!(parse_confirm(""), Some(true));
        assert_eq!(parse_confirm("Y"), Some(true));
        assert_eq!(parse_confirm("n"), Some(false));
        assert_eq!(parse_confirm("?"), None);
    }

    #[test]
    fn test_fill_with_defaults() {
        let mut input = ScriptedInput::new(vec![""; 15]);
        let display = DisplayManager::new();
        let form = PredictionForm::new(&mut input, &display).fill().unwrap().unwrap();

        assert_eq!(form.identity.name, "");
        assert_eq!(form.identity.gender, Gender::Perempuan);
        assert_eq!(form.symptoms, SymptomRecord::default());
    }

    #[test]
    fn test_fill_full_answers() {
        let mut input = ScriptedInput::new([
            "Budi Santoso", // name
            "2",            // gender
            "45",           // age
            "39.5",         // temperature
            "3",            // sore throat
            "2",            // muscle pain
            "30",           // cough
            "3",            // breathlessness
            "2",            // headache
            "5",            // duration
            "2",            // appetite
            "Ya",           // contact
            "y",            // submit
        ]);
        let display = DisplayManager::new();
        let form = PredictionForm::new(&mut input, &display).fill().unwrap().unwrap();

        assert_eq!(form.identity, Identity::new("Budi Santoso", Gender::LakiLaki, 45));
        assert_eq!(
            form.symptoms.features(),
            [39.5, 30.0, 3.0, 3.0, 5.0, 2.0, 2.0, 2.0, 45.0, 1.0]
        );
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_out_of_range_is_asked_again() {
        let mut answers = vec!["Ani", "", "130", "20"];
        answers.extend(vec![""; 10]);
        let mut input = ScriptedInput::new(answers);
        let display = DisplayManager::new();
        let form = PredictionForm::new(&mut input, &display).fill().unwrap().unwrap();

        assert_eq!(form.identity.age, 20);
        assert_eq!(form.symptoms.age_years, 20);
        let age_prompts = input.prompts().iter().filter(|p| p.starts_with("Usia")).count();
        assert_eq!(age_prompts, 2);
    }

    #[test]
    fn test_answers_stay_out_of_line_history() {
        let mut input = ScriptedInput::new([
            "Budi Santoso", "2", "45", "39.5", "3", "2", "30", "3", "2", "5", "2", "Ya", "y",
        ]);
        let display = DisplayManager::new();
        PredictionForm::new(&mut input, &display).fill().unwrap().unwrap();

        assert!(input.recorded().is_empty());
    }

    #[test]
    fn test_declined_submit_returns_none() {
        let mut answers = vec![""; 12];
        answers.push("n");
        let mut input = ScriptedInput::new(answers);
        let display = DisplayManager::new();
        assert!(PredictionForm::new(&mut input, &display).fill().unwrap().is_none());
    }

    #[test]
    fn test_eof_cancels_form() {
        let mut input = ScriptedInput::new(["Ani", "1"]);
        let display = DisplayManager::new();
        assert!(PredictionForm::new(&mut input, &display).fill().unwrap().is_none());
    }
}
