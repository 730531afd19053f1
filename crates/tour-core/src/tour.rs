//! ============================================================================
//! Tour - The ten narrated stops of the farm walk
//! ============================================================================

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Prefix of every audio asset name
pub const AUDIO_ASSET_PREFIX: &str = "stop-audio-";

/// File name prefix of the recordings on disk
pub const AUDIO_FILE_PREFIX: &str = "luisterpunt_";

/// File extension of the recordings on disk
pub const AUDIO_EXTENSION: &str = "mp3";

const CAPTIONS: [&str; 10] = [
    "Welkom op de kaasboerderij! We nemen je mee langs het erf, de dieren en natuurlijk… de kaas.",
    "Deze schapen zorgen voor een bijzondere melksoort. Proef je straks verschil tussen koe en schaap?",
    "In deze stal verblijven onze dieren ‘s winters. Ze krijgen hooi, kuilgras en veel rust.",
    "Zodra het kan, gaan onze dieren de wei in. Frisse lucht en gras maken gezonde melk.",
    "Elke ochtend wordt de melk vers verwerkt. Binnen een uur zit het al in de kaaspan.",
    "Hier roeren we de melk langzaam warm. Daarna wordt de wrongel gesneden en geperst.",
    "Kaas zwemt 24 uur in pekelwater. Dit zorgt voor de korst én de smaak.",
    "In de opslag liggen kazen wel 12 maanden te rijpen. Hoe ouder, hoe pittiger.",
    "Je kunt straks kazen proeven in de winkel. Vraag naar de jongste én de oudste variant!",
    "Bedankt voor je bezoek. Laat gerust een berichtje achter, of neem een stukje Texel mee naar huis.",
];

/// A single stop: caption plus audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TourStop {
    /// 1-based position in the walk
    pub number: usize,
    pub caption: &'static str,
}

impl TourStop {
    /// Asset name, e.g. `stop-audio-3`
    pub fn audio_asset(&self) -> String {
        format!("{}{}", AUDIO_ASSET_PREFIX, self.number)
    }

    /// Recording for this stop under `audio_dir`, e.g. `luisterpunt_3.mp3`
    pub fn audio_path(&self, audio_dir: &Path) -> PathBuf {
        audio_dir.join(format!(
            "{}{}.{}",
            AUDIO_FILE_PREFIX, self.number, AUDIO_EXTENSION
        ))
    }

    /// Heading shown above the caption
    pub fn title(&self) -> String {
        format!("Punt {}", self.number)
    }
}

/// All stops in walking order
pub static TOUR_STOPS: [TourStop; 10] = [
    TourStop { number: 1, caption: CAPTIONS[0] },
    TourStop { number: 2, caption: CAPTIONS[1] },
    TourStop { number: 3, caption: CAPTIONS[2] },
    TourStop { number: 4, caption: CAPTIONS[3] },
    TourStop { number: 5, caption: CAPTIONS[4] },
    TourStop { number: 6, caption: CAPTIONS[5] },
    TourStop { number: 7, caption: CAPTIONS[6] },
    TourStop { number: 8, caption: CAPTIONS[7] },
    TourStop { number: 9, caption: CAPTIONS[8] },
    TourStop { number: 10, caption: CAPTIONS[9] },
];
