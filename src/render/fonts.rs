//! System font discovery for date stamps.
//!
//! The stamp asks for a plain sans-serif face (Arial where it exists). Locales whose long date
//! uses CJK characters also get a CJK-capable face appended, so Parley can fall back to it
//! cluster by cluster.

use std::sync::{Arc, OnceLock};

use usvg::fontdb;

use crate::render::stamp::{DateLocale, StampFont};

const SANS_FAMILIES: &[&str] = &[
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "Arimo",
    "DejaVu Sans",
    "Noto Sans",
    "FreeSans",
];

const CJK_FAMILIES: &[&str] = &[
    "Noto Sans CJK TC",
    "Noto Sans TC",
    "Source Han Sans TC",
    "PingFang TC",
    "Microsoft JhengHei",
    "Heiti TC",
    "Noto Sans CJK SC",
    "Source Han Sans SC",
    "Noto Sans CJK JP",
    "WenQuanYi Zen Hei",
    "WenQuanYi Micro Hei",
    "AR PL UMing TW",
    "Droid Sans Fallback",
];

fn system_db() -> &'static fontdb::Database {
    static DB: OnceLock<fontdb::Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        db
    })
}

fn query_family(db: &fontdb::Database, family: fontdb::Family<'_>) -> Option<fontdb::ID> {
    db.query(&fontdb::Query {
        families: &[family],
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    })
}

fn sans_face(db: &fontdb::Database) -> Option<fontdb::ID> {
    SANS_FAMILIES
        .iter()
        .find_map(|name| query_family(db, fontdb::Family::Name(name)))
        .or_else(|| query_family(db, fontdb::Family::SansSerif))
        .or_else(|| {
            db.faces()
                .find(|f| f.style == fontdb::Style::Normal && !f.monospaced)
                .map(|f| f.id)
        })
}

fn cjk_face(db: &fontdb::Database) -> Option<fontdb::ID> {
    CJK_FAMILIES
        .iter()
        .find_map(|name| query_family(db, fontdb::Family::Name(name)))
        .or_else(|| {
            // Faces carrying a localized Chinese or Japanese family name cover Han characters.
            db.faces()
                .find(|f| {
                    f.families.iter().any(|(_, lang)| {
                        matches!(
                            lang,
                            fontdb::Language::Chinese_Taiwan
                                | fontdb::Language::Chinese_PeoplesRepublicOfChina
                                | fontdb::Language::Japanese_Japan
                        )
                    })
                })
                .map(|f| f.id)
        })
}

fn load_face(db: &fontdb::Database, id: fontdb::ID) -> Option<StampFont> {
    let family = db
        .face(id)
        .and_then(|f| f.families.first())
        .map(|(name, _)| name.clone())?;
    let bytes = db.with_face_data(id, |data, _index| data.to_vec())?;
    Some(StampFont::from_system(Arc::new(bytes), family))
}

fn cached_sans() -> Option<StampFont> {
    static SANS: OnceLock<Option<StampFont>> = OnceLock::new();
    SANS.get_or_init(|| {
        let db = system_db();
        sans_face(db).and_then(|id| load_face(db, id))
    })
    .clone()
}

fn cached_cjk() -> Option<StampFont> {
    static CJK: OnceLock<Option<StampFont>> = OnceLock::new();
    CJK.get_or_init(|| {
        let db = system_db();
        cjk_face(db)
            .filter(|id| sans_face(db) != Some(*id))
            .and_then(|id| load_face(db, id))
    })
    .clone()
}

/// Resolve stamp fonts for `locale` from the fonts installed on this machine.
///
/// Returns the faces in fallback order; empty when nothing usable is installed. Face bytes are
/// loaded once per process and shared.
pub(crate) fn system_stamp_fonts(locale: DateLocale) -> Vec<StampFont> {
    let mut fonts: Vec<StampFont> = cached_sans().into_iter().collect();
    if locale.uses_cjk() {
        match cached_cjk() {
            Some(font) => fonts.push(font),
            None if cjk_face(system_db()).is_some() => {}
            None => tracing::warn!(
                locale = ?locale,
                "no CJK-capable system font; some stamp characters will be missing"
            ),
        }
    }
    tracing::debug!(
        families = ?fonts.iter().filter_map(StampFont::family_hint).collect::<Vec<_>>(),
        "resolved stamp fonts"
    );
    fonts
}

#[cfg(test)]
#[path = "../../tests/unit/render/fonts.rs"]
mod tests;
