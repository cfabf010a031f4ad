//! Tests for sound classes and their parsing.

use prakriya_model::{ModelError, Pratyahara, Sound, SoundClass};

#[test]
fn parse_mixes_items() {
    let class = SoundClass::parse("i u").unwrap();
    assert_eq!(class.to_string(), "iIuU");

    let class = SoundClass::parse("c j").unwrap();
    assert!(class.contains('c') && class.contains('j'));
    assert!(!class.contains('C'));
}

#[test]
fn t_suffix_names_one_sound() {
    assert_eq!(SoundClass::parse("et").unwrap().to_string(), "e");
    assert_eq!(SoundClass::parse("Ft").unwrap().to_string(), "F");
    assert_eq!(SoundClass::parse("a").unwrap().to_string(), "aA");
}

#[test]
fn f_and_x_are_homogeneous() {
    let f = Sound::new('f').unwrap();
    let x = Sound::new('X').unwrap();
    assert!(f.savarna(&x));
    assert!(!f.savarna(&Sound::new('i').unwrap()));
}

#[test]
fn unknown_items_are_rejected() {
    assert_eq!(
        SoundClass::parse("xyz"),
        Err(ModelError::UnknownSoundClass("xyz".to_string()))
    );
    assert!(SoundClass::parse("   ").is_err());
    assert!("Kay".parse::<Pratyahara>().is_ok());
}

#[test]
fn khay_and_car() {
    let khay = SoundClass::pratyahara(Pratyahara::Khay);
    for c in "KPCWTcwtkp".chars() {
        assert!(khay.contains(c));
    }
    let car = SoundClass::pratyahara(Pratyahara::Car);
    assert!(car.contains('c') && car.contains('S') && !car.contains('K'));
}
