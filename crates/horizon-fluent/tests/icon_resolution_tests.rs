//! Integration tests for icon resolution against the bundled assets.

use std::sync::atomic::{AtomicBool, Ordering};

use horizon_fluent::icon::{AssetLocator, FluentIcon, FluentIconBase, IconContext, ThemedIcon};
use horizon_fluent::resource::ResourceManager;
use horizon_fluent::theme::{FixedTheme, IconColor, ThemeMode, ThemeSetting};

fn resolve(icon: &dyn FluentIconBase, theme: ThemeMode, ctx: &IconContext<'_>) -> String {
    match icon.path(theme, ctx).unwrap() {
        AssetLocator::Path(path) => path,
        other => panic!("expected a path locator, got {other}"),
    }
}

#[test]
fn test_home_scenario() {
    let assets = ResourceManager::with_fluent_icons();
    let ctx = IconContext::new(&assets, &FixedTheme::DARK);

    let light = resolve(&FluentIcon::Home, ThemeMode::Light, &ctx);
    let dark = resolve(&FluentIcon::Home, ThemeMode::Dark, &ctx);
    let auto = resolve(&FluentIcon::Home, ThemeMode::Auto, &ctx);

    assert!(light.ends_with("/Home_black.svg"));
    assert!(dark.ends_with("/Home_white.svg"));
    assert_eq!(auto, dark);
}

#[test]
fn test_every_icon_has_distinct_existing_variants() {
    let assets = ResourceManager::with_fluent_icons();
    let ctx = IconContext::new(&assets, &FixedTheme::LIGHT);

    for &icon in FluentIcon::ALL {
        let light = resolve(&icon, ThemeMode::Light, &ctx);
        let dark = resolve(&icon, ThemeMode::Dark, &ctx);

        assert_ne!(light, dark, "{icon}");
        assert!(assets.exists(&light), "{light}");
        assert!(assets.exists(&dark), "{dark}");

        assert_eq!(FluentIcon::from_locator(&light), Some((icon, IconColor::Black)));
        assert_eq!(FluentIcon::from_locator(&dark), Some((icon, IconColor::White)));
        assert_eq!(FluentIcon::from_name(icon.name()), Some(icon));
    }
}

#[test]
fn test_auto_tracks_oracle_live() {
    let dark = AtomicBool::new(false);
    let oracle = || dark.load(Ordering::SeqCst);
    let assets = ResourceManager::with_fluent_icons();
    let ctx = IconContext::new(&assets, &oracle);

    let before = resolve(&FluentIcon::Search, ThemeMode::Auto, &ctx);
    dark.store(true, Ordering::SeqCst);
    let after = resolve(&FluentIcon::Search, ThemeMode::Auto, &ctx);

    assert_eq!(before, FluentIcon::Search.locator(IconColor::Black));
    assert_eq!(after, FluentIcon::Search.locator(IconColor::White));
}

#[test]
fn test_theme_setting_as_oracle() {
    let setting = ThemeSetting::with_fallback(ThemeMode::Light, FixedTheme::DARK);
    let assets = ResourceManager::with_fluent_icons();
    let ctx = IconContext::new(&assets, &setting);

    assert!(resolve(&FluentIcon::Mail, ThemeMode::Auto, &ctx).ends_with("_black.svg"));

    setting.set_mode(ThemeMode::Auto);
    assert!(resolve(&FluentIcon::Mail, ThemeMode::Auto, &ctx).ends_with("_white.svg"));
}

#[test]
fn test_user_defined_icon_through_trait_object() {
    let icons: Vec<Box<dyn FluentIconBase>> = vec![
        Box::new(FluentIcon::Folder),
        Box::new(ThemedIcon::new("app:/logo_light.svg", "app:/logo_dark.svg")),
    ];
    let assets = ResourceManager::with_fluent_icons();
    let ctx = IconContext::new(&assets, &FixedTheme::DARK);

    let resolved: Vec<_> = icons
        .iter()
        .map(|icon| resolve(icon.as_ref(), ThemeMode::Auto, &ctx))
        .collect();

    assert_eq!(resolved, ["fluent:/icons/Folder_white.svg", "app:/logo_dark.svg"]);
}

#[test]
fn test_global_manager_resolves_bundle() {
    let ctx = IconContext::new(ResourceManager::global(), &FixedTheme::LIGHT);
    assert_eq!(
        resolve(&FluentIcon::GitHub, ThemeMode::Auto, &ctx),
        "fluent:/icons/GitHub_black.svg"
    );
}
