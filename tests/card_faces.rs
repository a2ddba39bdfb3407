mod common;

use cardpress::rendering::render_face;
use cardpress::{CardPress, CardStore, CardType, Error, Face};
use common::*;
use image::Rgba;

#[test]
fn recto_places_title_separator_name_and_strip() {
    let (_dir, press) = press([1]);
    let img = decode(&press.render_face(1, Face::Recto).unwrap());
    assert_eq!(img.dimensions(), (400, 400));

    // contour ring repainted in the type color
    assert_eq!(img.get_pixel(2, 200), &RED);
    assert_eq!(img.get_pixel(200, 397), &RED);

    // "Peril" at 34px: 5 cells of 20px centered at x=150, top at y=20
    assert_eq!(img.get_pixel(155, 30), &BLACK);
    assert_eq!(img.get_pixel(150, 30), &WHITE);
    assert_eq!(img.get_pixel(155, 19), &WHITE);
    assert_eq!(img.get_pixel(155, 54), &WHITE);

    // separator widened to 245px, centered, at y = 25 + 4 + 30
    let sep = img.get_pixel(200, 60);
    assert!((85..=95).contains(&sep.0[0]), "separator pixel {:?}", sep);
    assert_eq!(img.get_pixel(200, 57), &WHITE);
    assert_eq!(img.get_pixel(60, 60), &WHITE);

    // "Run!" then "Fast", 29px lines 4px apart starting at (50, 85)
    assert_eq!(img.get_pixel(52, 90), &BLACK);
    assert_eq!(img.get_pixel(52, 116), &WHITE);
    assert_eq!(img.get_pixel(52, 120), &BLACK);
    assert_eq!(img.get_pixel(130, 90), &WHITE);

    // difficulty 3 strip: 37x10 at (100, 370)
    assert!(is_red(img.get_pixel(106, 375)));
    assert_eq!(img.get_pixel(140, 375), &WHITE);
    assert_eq!(img.get_pixel(106, 365), &WHITE);
}

#[test]
fn verso_places_logo_title_and_strip() {
    let (_dir, press) = press([1]);
    let img = decode(&press.render_face(1, Face::Verso).unwrap());

    assert_eq!(img.get_pixel(2, 2), &RED);
    // 60px logo vertically centered at x=15
    assert_eq!(img.get_pixel(40, 200), &LOGO_BLUE);
    assert_eq!(img.get_pixel(40, 168), &WHITE);
    // 45px title at ((400 - 135) / 2, (400 - 45) / 3 - 20)
    assert_eq!(img.get_pixel(140, 120), &BLACK);
    assert_eq!(img.get_pixel(140, 96), &WHITE);
    // strip lifted to 400 - 10 - 100
    assert!(is_red(img.get_pixel(106, 295)));
    assert_eq!(img.get_pixel(106, 375), &WHITE);
}

#[test]
fn type_without_color_keeps_templates() {
    let (_dir, press) = press([1, 3]);
    let (card, card_type) = press.store().card(3).unwrap();
    assert_eq!(card_type.name, "Calm");
    let img = decode(&press.render_card(&card, &card_type, Face::Recto).unwrap());
    assert_eq!(img.get_pixel(2, 200), &common::CONTOUR_GRAY);
    // white pips on a white strip
    assert_eq!(img.get_pixel(106, 375), &WHITE);
}

#[test]
fn strip_grows_with_difficulty() {
    let (_dir, press) = press([1]);
    let peril = press.store().card_type(1).unwrap();
    let render = |difficulty| {
        let card = card(40, "Pips", difficulty, 1);
        decode(&press.render_card(&card, &peril, Face::Recto).unwrap())
    };
    let one = render(1);
    let two = render(2);
    assert!(is_red(one.get_pixel(106, 375)));
    assert!(is_red(two.get_pixel(106, 375)));
    assert_eq!(one.get_pixel(118, 375), &WHITE);
    assert!(is_red(two.get_pixel(118, 375)));
}

#[test]
fn long_names_are_wrapped() {
    let (_dir, press) = press([1]);
    let peril = press.store().card_type(1).unwrap();
    let card = card(41, "Supercalifragilistic", 1, 1);
    let img = decode(&press.render_card(&card, &peril, Face::Recto).unwrap());
    // 20 cells of 17px would overflow, so the name is split 10 + 10
    assert_eq!(img.get_pixel(52, 90), &BLACK);
    assert_eq!(img.get_pixel(52, 120), &BLACK);
    assert_eq!(img.get_pixel(230, 90), &WHITE);
}

#[test]
fn rendering_is_deterministic() {
    let (_dir, press) = press([1]);
    let (card, card_type) = press.store().card(1).unwrap();
    for face in Face::ALL {
        let a = render_face(press.assets(), &card, &card_type, face).unwrap();
        let b = render_face(press.assets(), &card, &card_type, face).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.to_png().unwrap(), b.to_png().unwrap());
    }
}

#[test]
fn recolor_follows_type_color() {
    let (_dir, press) = press([1]);
    let (card, _) = press.store().card(1).unwrap();
    let teal = CardType::new(1, "Peril", Some("rgb(0, 128, 128)"));
    let img = decode(&press.render_card(&card, &teal, Face::Verso).unwrap());
    assert_eq!(img.get_pixel(2, 200), &Rgba([0, 128, 128, 255]));

    let broken = CardType::new(1, "Peril", Some("#12"));
    assert!(matches!(
        press.render_card(&card, &broken, Face::Recto),
        Err(Error::InvalidColor(_))
    ));
}

#[test]
fn type_sample_uses_a_placeholder_card() {
    let (_dir, press) = press([1]);
    let img = decode(&press.render_type_sample(1, Face::Recto).unwrap());
    // "Template" in the name slot
    assert_eq!(img.get_pixel(52, 90), &BLACK);
    assert_eq!(img.get_pixel(52, 120), &WHITE);
    // at most 4 pips: the strip never reaches x = 152
    assert!(is_red(img.get_pixel(106, 375)));
    assert_eq!(img.get_pixel(152, 375), &WHITE);

    let a = press.render_type_sample_with_difficulty(2, Face::Verso, 2).unwrap();
    let b = press.render_type_sample_with_difficulty(2, Face::Verso, 2).unwrap();
    assert_eq!(a, b);
}

#[test]
fn unknown_ids_are_not_found() {
    let (_dir, press) = press([1]);
    assert!(matches!(press.render_face(99, Face::Recto), Err(Error::NotFound(_))));
    assert!(matches!(
        press.render_type_sample(42, Face::Verso),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn difficulty_wider_than_the_face_is_rejected() {
    let (_dir, press) = press([1]);
    let peril = press.store().card_type(1).unwrap();
    for difficulty in [u32::MAX / 8, 100] {
        let card = card(42, "Endless", difficulty, 1);
        for face in Face::ALL {
            assert!(matches!(
                press.render_card(&card, &peril, face),
                Err(Error::InvalidInput(_))
            ));
        }
    }
    // (40 + 10) * 32 / 4 = 400 still fits
    let widest = card(43, "Widest", 32, 1);
    assert!(press.render_card(&widest, &peril, Face::Recto).is_ok());
}

#[cfg(feature = "truetype")]
#[test]
fn truetype_title_is_centered() {
    use cardpress::FontSource;
    use std::path::PathBuf;

    let dir = tempfile::tempdir().unwrap();
    let mut config = press_config(dir.path());
    config.assets.font = FontSource::TrueType {
        path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fonts/DejaVuSansMono.ttf"),
    };
    let press = CardPress::new(config, catalog([1])).unwrap();
    let img = decode(&press.render_face(1, Face::Recto).unwrap());

    // ink of the "Peril" title, above the separator
    let mut xs = Vec::new();
    for y in 6..57 {
        for x in 6..394 {
            if img.get_pixel(x, y) != &WHITE {
                xs.push(x);
            }
        }
    }
    assert!(!xs.is_empty(), "no title ink");
    let (left, right) = (*xs.iter().min().unwrap(), *xs.iter().max().unwrap());
    assert!(((left + right) / 2).abs_diff(200) <= 10, "{}..{}", left, right);
    // the name starts at x = 50 and gets two lines
    assert!((85..115).any(|y| (50..80).any(|x| img.get_pixel(x, y) != &WHITE)));
    assert!((118..150).any(|y| (50..80).any(|x| img.get_pixel(x, y) != &WHITE)));
}
