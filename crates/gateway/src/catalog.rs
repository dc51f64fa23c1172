//! Built-in clinic FAQ content and catalog loading.

use clinic_core::{AnswerSegment as S, Catalog, Intent, Result};

const PHONE_HAVIROV: (&str, &str) = ("+420 773 595 504", "tel:+420773595504");
const PHONE_DOUBRAVA: (&str, &str) = ("+420 773 118 560", "tel:+420773118560");
const PHONE_ZASTUP: (&str, &str) = ("+420 596 884 608", "tel:+420596884608");

/// The clinic's FAQ intents, in match priority order.
///
/// Keyword lists overlap on purpose (`odbery` belongs to both opening hours
/// and services); the earlier intent wins.
pub fn clinic_catalog() -> Result<Catalog> {
    Catalog::new(vec![
        Intent::new("adresa", "Adresa")
            .with_keywords(["adresa", "kde", "kde jste", "misto", "mapa", "umisteni", "lokace"])
            .with_answer(vec![
                S::text("Havířov: Nákupní 1/426, Havířov – Šumbark, 736 01"),
                S::Break,
                S::text("Doubrava: dům č. 444, Doubrava"),
                S::Break,
                S::link("Otevřít mapu na stránce Kontakt", "kontakt.html#mapa"),
            ]),
        Intent::new("kontakt", "Kontakt")
            .with_keywords(["kontakt", "telefon", "cislo", "volat", "zpravy", "objednani", "leky"])
            .with_answer(vec![
                S::text("Havířov: "),
                S::link(PHONE_HAVIROV.0, PHONE_HAVIROV.1),
                S::Break,
                S::text("Doubrava: "),
                S::link(PHONE_DOUBRAVA.0, PHONE_DOUBRAVA.1),
                S::Break,
                S::text("Zástup: "),
                S::link(PHONE_ZASTUP.0, PHONE_ZASTUP.1),
                S::Break,
                S::Break,
                S::text(
                    "Objednávání, zprávy pro lékaře a objednání léků: 10:00–11:00 a 16:00–17:00.",
                ),
                S::Break,
                S::link("Detail na stránce Kontakt", "kontakt.html"),
            ]),
        Intent::new("hodiny", "Ordinační hodiny")
            .with_keywords(["hodiny", "ordinacni", "oteviraci", "kdy", "kdy mate", "provozni doba", "odbery"])
            .with_answer(vec![
                S::text("Běžné ordinační hodiny jsou na stránce Ordinační hodiny."),
                S::Break,
                S::text("Tip: odběry v Havířově probíhají od 7:00."),
                S::Break,
                S::link("Otevřít ordinační hodiny", "hodiny.html"),
            ]),
        Intent::new("sluzby", "Služby")
            .with_keywords(["sluzby", "ockovani", "odbery", "preventivni", "potvrzeni", "vypis", "pojistovny"])
            .with_answer(vec![
                S::text(
                    "Poskytujeme preventivní a léčebnou péči, laboratorní odběry, očkování a administrativu (potvrzení, výpisy…).",
                ),
                S::Break,
                S::link("Zobrazit služby", "sluzby.html"),
            ]),
        Intent::new("zastup", "Zastupování")
            .with_keywords(["zastup", "zastoupeni", "dovolena", "klecatsky", "doubrava"])
            .with_answer(vec![
                S::text("Pro Doubravu v době dovolených zastupuje MUDr. Klečatský Vladimír."),
                S::Break,
                S::text("Telefon: "),
                S::link(PHONE_ZASTUP.0, PHONE_ZASTUP.1),
                S::Break,
                S::link("Detail zastupování", "zastup.html"),
            ]),
    ])
}

/// Load the catalog from a YAML file, or fall back to the built-in content.
pub fn load_catalog(path: Option<&str>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let catalog = Catalog::from_yaml_file(path)?;
            tracing::info!(path = %path, intents = catalog.len(), "Loaded intent catalog from file");
            Ok(catalog)
        }
        None => {
            let catalog = clinic_catalog()?;
            tracing::info!(intents = catalog.len(), "Using built-in intent catalog");
            Ok(catalog)
        }
    }
}
