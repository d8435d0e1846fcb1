use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDate, NaiveTime};

use ecclesia_portal::domain::types::{ChurchSettings, ThemeColors};
use ecclesia_portal::error::PortalError;
use ecclesia_portal::settings::SettingsHandle;
use ecclesia_portal::usecase::settings::{
    ApplyThemeUseCase, UpdateSettingsInput, UpdateSettingsUseCase,
};

use crate::helpers::{
    FixedClock, MockSettingsRepo, MockThemeRepo, t0, test_admin, test_theme,
};

fn valid_input() -> UpdateSettingsInput {
    UpdateSettingsInput {
        church_name: "  Église La Grâce  ".to_owned(),
        slogan: "Marcher ensemble".to_owned(),
        founded_date: NaiveDate::from_ymd_opt(1998, 3, 14),
        history: "Fondée dans un salon de Niamey.".to_owned(),
        vision: "Une église pour chaque quartier.".to_owned(),
        mission: String::new(),
        core_values: "Prière\nService".to_owned(),
        current_pastor: "Pasteur Issa Moussa".to_owned(),
        pastor_since: NaiveDate::from_ymd_opt(2015, 9, 1),
        pastor_bio: String::new(),
        leadership_team: "Diacre Amina\nAncien Oumarou".to_owned(),
        email: "contact@egliselagrace.com".to_owned(),
        phone: "+227 90 00 00 00".to_owned(),
        whatsapp: String::new(),
        address: String::new(),
        city: "Niamey".to_owned(),
        country: "Niger".to_owned(),
        facebook: "https://facebook.com/egliselagrace".to_owned(),
        instagram: String::new(),
        youtube: "https://youtube.com/@egliselagrace".to_owned(),
        twitter: String::new(),
        website: "https://egliselagrace.com".to_owned(),
        colors: ThemeColors::default(),
        sunday_service_time: NaiveTime::from_hms_opt(9, 30, 0),
        wednesday_service_time: NaiveTime::from_hms_opt(18, 0, 0),
        friday_service_time: None,
        custom_services: "Samedi 15h: École du dimanche".to_owned(),
        timezone: "Africa/Niamey".to_owned(),
        language: "en".to_owned(),
        enable_whatsapp_notifications: false,
        enable_email_notifications: true,
    }
}

async fn loaded(repo: &MockSettingsRepo) -> SettingsHandle {
    SettingsHandle::load(repo).await.unwrap()
}

#[tokio::test]
async fn should_create_defaults_on_first_load() {
    let repo = MockSettingsRepo::empty();
    let handle = loaded(&repo).await;

    assert_eq!(*handle.current(), ChurchSettings::defaults(t0()));
    assert!(repo.row_handle().lock().unwrap().is_some());
}

#[tokio::test]
async fn should_persist_and_invalidate_on_update() {
    let repo = MockSettingsRepo::empty();
    let handle = loaded(&repo).await;
    let reader = handle.clone();
    let clock = FixedClock::at(t0());
    clock.advance(Duration::hours(1));
    let admin = test_admin();

    let uc = UpdateSettingsUseCase {
        repo: repo.clone(),
        handle,
        clock,
    };
    let updated = uc.execute(admin.id, valid_input()).await.unwrap();

    assert_eq!(updated.church_name, "Église La Grâce");
    assert_eq!(updated.language, "en");
    assert_eq!(updated.founded_date, NaiveDate::from_ymd_opt(1998, 3, 14));
    assert_eq!(updated.current_pastor, "Pasteur Issa Moussa");
    assert_eq!(updated.leadership_team, "Diacre Amina\nAncien Oumarou");
    assert_eq!(updated.youtube, "https://youtube.com/@egliselagrace");
    assert_eq!(updated.sunday_service_time, NaiveTime::from_hms_opt(9, 30, 0));
    assert_eq!(updated.friday_service_time, None);
    assert_eq!(updated.updated_by, Some(admin.id));
    assert_eq!(updated.updated_at, t0() + Duration::hours(1));
    assert_eq!(reader.current().church_name, "Église La Grâce");
    assert_eq!(
        repo.row_handle().lock().unwrap().as_ref(),
        Some(&*updated),
        "handle and row agree"
    );
}

#[tokio::test]
async fn should_reject_invalid_settings_without_writing() {
    let repo = MockSettingsRepo::empty();
    let handle = loaded(&repo).await;
    let before = handle.current();
    let uc = UpdateSettingsUseCase {
        repo: repo.clone(),
        handle: handle.clone(),
        clock: FixedClock::at(t0()),
    };

    let mut bad_color = valid_input();
    bad_color.colors.primary = "blue".to_owned();
    let mut bad_language = valid_input();
    bad_language.language = "de".to_owned();
    let mut blank_name = valid_input();
    blank_name.church_name = "   ".to_owned();
    let mut bad_website = valid_input();
    bad_website.website = "egliselagrace.com".to_owned();
    let mut bad_facebook = valid_input();
    bad_facebook.facebook = "facebook.com/egliselagrace".to_owned();
    let mut long_pastor = valid_input();
    long_pastor.current_pastor = "P".repeat(201);

    for input in [
        bad_color,
        bad_language,
        blank_name,
        bad_website,
        bad_facebook,
        long_pastor,
    ] {
        let result = uc.execute(test_admin().id, input).await;
        assert!(
            matches!(result, Err(PortalError::InvalidSettings(_))),
            "expected InvalidSettings, got {result:?}"
        );
    }
    assert_eq!(handle.current(), before);
}

#[tokio::test]
async fn should_apply_active_theme_colors() {
    let repo = MockSettingsRepo::empty();
    let handle = loaded(&repo).await;
    let theme = test_theme(2, true);
    let uc = ApplyThemeUseCase {
        repo: repo.clone(),
        themes: MockThemeRepo::new(vec![test_theme(1, true), theme.clone()]),
        handle: handle.clone(),
        clock: FixedClock::at(t0()),
    };

    let settings = uc.execute(test_admin().id, 2).await.unwrap();

    assert_eq!(settings.colors.primary, theme.primary_color);
    assert_eq!(settings.colors.secondary, theme.secondary_color);
    assert_eq!(settings.colors.accent, theme.accent_color);
    assert_eq!(settings.colors.success, ThemeColors::default().success);
    assert_eq!(handle.current().colors.primary, theme.primary_color);
    assert!(handle.current().colors_css().contains(&theme.primary_color));
}

#[tokio::test]
async fn should_refuse_missing_or_inactive_theme() {
    let repo = MockSettingsRepo::empty();
    let handle = loaded(&repo).await;
    let uc = ApplyThemeUseCase {
        repo: repo.clone(),
        themes: MockThemeRepo::new(vec![test_theme(3, false)]),
        handle: handle.clone(),
        clock: FixedClock::at(t0()),
    };

    let missing = uc.execute(test_admin().id, 99).await;
    let inactive = uc.execute(test_admin().id, 3).await;

    assert!(matches!(missing, Err(PortalError::ThemeNotFound)));
    assert!(matches!(inactive, Err(PortalError::ThemeInactive)));
    assert_eq!(handle.current().colors, ThemeColors::default());
}

#[tokio::test]
async fn should_parse_full_settings_body() {
    let input: UpdateSettingsInput = serde_json::from_value(serde_json::json!({
        "church_name": "Église La Grâce",
        "founded_date": "1998-03-14",
        "pastor_since": null,
        "sunday_service_time": "09:30:00",
        "colors": ThemeColors::default(),
        "timezone": "Africa/Niamey",
        "language": "fr",
        "enable_whatsapp_notifications": true,
        "enable_email_notifications": false
    }))
    .unwrap();

    assert_eq!(input.founded_date, NaiveDate::from_ymd_opt(1998, 3, 14));
    assert_eq!(input.pastor_since, None);
    assert_eq!(input.sunday_service_time, NaiveTime::from_hms_opt(9, 30, 0));
    assert_eq!(input.wednesday_service_time, None);
    assert!(input.history.is_empty());
}

#[tokio::test]
async fn should_keep_handle_equal_to_row_when_slow_writer_commits_first() {
    let repo = MockSettingsRepo::empty()
        .with_save_delays([StdDuration::from_millis(50), StdDuration::from_millis(1)]);
    let handle = loaded(&repo).await;
    let uc = UpdateSettingsUseCase {
        repo: repo.clone(),
        handle: handle.clone(),
        clock: FixedClock::at(t0()),
    };
    let mut first = valid_input();
    first.church_name = "Église A".to_owned();
    let mut second = valid_input();
    second.church_name = "Église B".to_owned();

    let (a, b) = tokio::join!(
        uc.execute(test_admin().id, first),
        uc.execute(test_admin().id, second),
    );
    a.unwrap();
    b.unwrap();

    let row = repo.row_handle().lock().unwrap().clone().unwrap();
    assert_eq!(row.church_name, "Église B");
    assert_eq!(*handle.current(), row, "handle must match the last committed row");
}

#[tokio::test]
async fn should_not_lose_concurrent_update_when_theme_applied() {
    let repo = MockSettingsRepo::empty()
        .with_save_delays([StdDuration::from_millis(50), StdDuration::from_millis(1)]);
    let handle = loaded(&repo).await;
    let theme = test_theme(2, true);
    let apply = ApplyThemeUseCase {
        repo: repo.clone(),
        themes: MockThemeRepo::new(vec![theme.clone()]),
        handle: handle.clone(),
        clock: FixedClock::at(t0()),
    };
    let update = UpdateSettingsUseCase {
        repo: repo.clone(),
        handle: handle.clone(),
        clock: FixedClock::at(t0()),
    };

    let (applied, updated) = tokio::join!(
        apply.execute(test_admin().id, 2),
        update.execute(test_admin().id, valid_input()),
    );
    applied.unwrap();
    updated.unwrap();

    let row = repo.row_handle().lock().unwrap().clone().unwrap();
    assert_eq!(row.church_name, "Église La Grâce");
    assert_eq!(*handle.current(), row);
}
