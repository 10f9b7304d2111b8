/// Bilingual (English / Mongolian) display strings.
///
/// Only two languages exist; every localized value is a pair.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Mn,
}

impl Language {
    /// Wire index used by the presentation layer (0 = en, 1 = mn).
    /// Unknown indices fall back to English.
    pub fn from_index(index: u32) -> Self {
        match index {
            1 => Language::Mn,
            _ => Language::En,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Mn,
            Language::Mn => Language::En,
        }
    }
}

/// A string available in both languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub mn: String,
}

impl LocalizedText {
    pub fn new(en: &str, mn: &str) -> Self {
        Self { en: en.to_owned(), mn: mn.to_owned() }
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Mn => &self.mn,
        }
    }
}

/// Overlay labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiKey {
    AppTitle,
    SimSettings,
    Years,
    Months,
    Days,
    StartSim,
    StopSim,
    Reset,
    DistTraveled,
    Velocity,
    MillionKm,
    KmPerSecond,
    Lang,
    Focus,
    Exit,
    MissionReport,
    MissionComplete,
    ReportDesc,
    Close,
    Menu,
    Overview,
    Speed,
    Temperature,
    Gravity,
    EnterVr,
    ExitVr,
    VrNotSupported,
    VrHint,
    GrabPlanet,
    Loading,
}

impl UiKey {
    pub const ALL: [UiKey; 30] = [
        UiKey::AppTitle, UiKey::SimSettings, UiKey::Years, UiKey::Months, UiKey::Days,
        UiKey::StartSim, UiKey::StopSim, UiKey::Reset, UiKey::DistTraveled, UiKey::Velocity,
        UiKey::MillionKm, UiKey::KmPerSecond, UiKey::Lang, UiKey::Focus, UiKey::Exit,
        UiKey::MissionReport, UiKey::MissionComplete, UiKey::ReportDesc, UiKey::Close, UiKey::Menu,
        UiKey::Overview, UiKey::Speed, UiKey::Temperature, UiKey::Gravity, UiKey::EnterVr,
        UiKey::ExitVr, UiKey::VrNotSupported, UiKey::VrHint, UiKey::GrabPlanet, UiKey::Loading,
    ];

    /// Snake-case identifier used by the presentation layer.
    pub fn name(self) -> &'static str {
        match self {
            UiKey::AppTitle => "app_title",
            UiKey::SimSettings => "sim_settings",
            UiKey::Years => "years",
            UiKey::Months => "months",
            UiKey::Days => "days",
            UiKey::StartSim => "start_sim",
            UiKey::StopSim => "stop_sim",
            UiKey::Reset => "reset",
            UiKey::DistTraveled => "dist_traveled",
            UiKey::Velocity => "velocity",
            UiKey::MillionKm => "million_km",
            UiKey::KmPerSecond => "km_s",
            UiKey::Lang => "lang",
            UiKey::Focus => "focus",
            UiKey::Exit => "exit",
            UiKey::MissionReport => "mission_report",
            UiKey::MissionComplete => "mission_complete",
            UiKey::ReportDesc => "report_desc",
            UiKey::Close => "close",
            UiKey::Menu => "menu",
            UiKey::Overview => "overview",
            UiKey::Speed => "speed",
            UiKey::Temperature => "temperature",
            UiKey::Gravity => "gravity",
            UiKey::EnterVr => "enter_vr",
            UiKey::ExitVr => "exit_vr",
            UiKey::VrNotSupported => "vr_not_supported",
            UiKey::VrHint => "vr_hint",
            UiKey::GrabPlanet => "grab_planet",
            UiKey::Loading => "loading",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    pub fn text(self, lang: Language) -> &'static str {
        let (en, mn) = match self {
            UiKey::AppTitle => ("Solar Simulator", "Нарны Систем"),
            UiKey::SimSettings => ("Simulation Target", "Симуляцийн тохиргоо"),
            UiKey::Years => ("Years", "Жил"),
            UiKey::Months => ("Months", "Сар"),
            UiKey::Days => ("Days", "Өдөр"),
            UiKey::StartSim => ("Simulate", "Эхлүүлэх"),
            UiKey::StopSim => ("Stop", "Зогсоох"),
            UiKey::Reset => ("Reset", "Шинэчлэх"),
            UiKey::DistTraveled => ("Distance Traveled", "Туулсан зам"),
            UiKey::Velocity => ("Avg Velocity", "Дундаж хурд"),
            UiKey::MillionKm => ("million km", "сая км"),
            UiKey::KmPerSecond => ("km/s", "км/с"),
            UiKey::Lang => ("EN", "МН"),
            UiKey::Focus => ("Focus", "Төвлөрөх"),
            UiKey::Exit => ("Exit", "Гарах"),
            UiKey::MissionReport => ("Mission Report", "Үр дүнгийн тайлан"),
            UiKey::MissionComplete => ("Simulation Complete", "Симуляци дууслаа"),
            UiKey::ReportDesc => (
                "Visualizing planetary travel distance for this period.",
                "Энэ хугацаанд гаргуудын туулсан замыг харьцуулав.",
            ),
            UiKey::Close => ("Close", "Хаах"),
            UiKey::Menu => ("System Map", "Газрын зураг"),
            UiKey::Overview => ("System Overview", "Системийг харах"),
            UiKey::Speed => ("Speed", "Хурд"),
            UiKey::Temperature => ("Temp", "Температур"),
            UiKey::Gravity => ("Gravity", "Таталцал"),
            UiKey::EnterVr => ("Enter VR", "VR-д орох"),
            UiKey::ExitVr => ("Exit VR", "VR-аас гарах"),
            UiKey::VrNotSupported => ("VR not supported", "VR дэмжигдэхгүй"),
            UiKey::VrHint => ("Point at planets to select", "Гараараа заана уу"),
            UiKey::GrabPlanet => ("Selected", "Сонгосон"),
            UiKey::Loading => ("Loading System...", "Систем ачааллаж байна..."),
        };
        match lang {
            Language::En => en,
            Language::Mn => mn,
        }
    }
}

/// Format a distance for the overlay: millions with two decimals above
/// one million km, otherwise whole kilometres with digit grouping.
pub fn format_distance(km: f64, lang: Language) -> String {
    if !km.is_finite() || km <= 0.0 {
        return "0 km".to_owned();
    }
    if km > 1_000_000.0 {
        format!("{:.2} {}", km / 1_000_000.0, UiKey::MillionKm.text(lang))
    } else {
        format!("{} km", group_thousands(km.round() as u64))
    }
}

/// `1234567` → `"1,234,567"`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_round_trips_by_name() {
        for key in UiKey::ALL {
            assert_eq!(UiKey::from_name(key.name()), Some(key));
        }
        assert_eq!(UiKey::from_name("nope"), None);
    }

    #[test]
    fn every_key_has_both_languages() {
        for key in UiKey::ALL {
            assert!(!key.text(Language::En).is_empty(), "{} missing en", key.name());
            assert!(!key.text(Language::Mn).is_empty(), "{} missing mn", key.name());
        }
    }

    #[test]
    fn language_index_falls_back_to_english() {
        assert_eq!(Language::from_index(1), Language::Mn);
        assert_eq!(Language::from_index(7), Language::En);
        assert_eq!(Language::En.toggled(), Language::Mn);
    }

    #[test]
    fn distance_in_millions() {
        assert_eq!(format_distance(2_587_000_000.0, Language::En), "2587.00 million km");
        assert_eq!(format_distance(4_136_000.0, Language::Mn), "4.14 сая км");
    }

    #[test]
    fn small_distance_grouped() {
        assert_eq!(format_distance(999_999.4, Language::En), "999,999 km");
        assert_eq!(format_distance(1_000.0, Language::En), "1,000 km");
        assert_eq!(format_distance(12.0, Language::En), "12 km");
        assert_eq!(format_distance(0.0, Language::En), "0 km");
    }
}
