use console::Style;
use geodot_core::annotation::Point;
use geodot_core::api::types::BuildingPoint;
use geodot_core::catalog::FeatureCatalog;
use geodot_core::session::{Notice, NoticeLevel};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    linked: Style,
    missing: Style,
    success: Style,
    warning: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            linked: Style::new().green(),
            missing: Style::new().dim().yellow(),
            success: Style::new().green().bold(),
            warning: Style::new().yellow().bold(),
            error: Style::new().red().bold(),
        }
    }
}

fn optional(s: &Styles, value: Option<&str>) -> String {
    match value {
        Some(v) => s.value.apply_to(v).to_string(),
        None => s.missing.apply_to("-").to_string(),
    }
}

/// Point table: 1-based row, pixels, name, symbol, coordinates.
pub fn print_points(points: &[Point]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to(format!("Annotations ({})", points.len())));
    println!();
    if points.is_empty() {
        println!("  {}", s.missing.apply_to("none"));
        return;
    }
    println!(
        "  {:>4}  {:>8}  {:>8}  {:<24}  {:<8}  {:<12}  {:<12}",
        s.label.apply_to("#"),
        s.label.apply_to("X"),
        s.label.apply_to("Y"),
        s.label.apply_to("Name"),
        s.label.apply_to("Symbol"),
        s.label.apply_to("Longitude"),
        s.label.apply_to("Latitude"),
    );
    for (i, point) in points.iter().enumerate() {
        let (lon, lat) = match point.building_point_id {
            Some(id) => {
                let linked = s.linked.apply_to(format!("bp #{id}")).to_string();
                (linked.clone(), linked)
            }
            None => (
                optional(&s, point.longitude.as_deref()),
                optional(&s, point.latitude.as_deref()),
            ),
        };
        println!(
            "  {:>4}  {:>8.1}  {:>8.1}  {:<24}  {:<8}  {:<12}  {:<12}",
            i + 1,
            point.x,
            point.y,
            point.name,
            point.symbol.as_deref().unwrap_or("-"),
            lon,
            lat,
        );
    }
    println!();
}

pub fn print_building_points(points: &[BuildingPoint]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to(format!("Building points ({})", points.len())));
    println!();
    for point in points {
        println!(
            "  {:>6}  {:<28}{}",
            s.label.apply_to(point.id),
            s.value.apply_to(&point.name),
            format!("{:>12.6}  {:>11.6}", point.longitude, point.latitude)
        );
    }
    println!();
}

pub fn print_catalog(catalog: &FeatureCatalog) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to(format!("Catalog ({})", catalog.len())));
    println!();
    for entry in catalog {
        println!(
            "  {:<24}{}  {}  {}",
            s.value.apply_to(entry.key()),
            optional(&s, entry.longitude.as_deref()),
            optional(&s, entry.latitude.as_deref()),
            optional(&s, entry.height.as_deref()),
        );
    }
    println!();
}

pub fn print_notices(notices: &[Notice]) {
    let s = Styles::new();
    for notice in notices {
        let style = match notice.level {
            NoticeLevel::Info => &s.label,
            NoticeLevel::Success => &s.success,
            NoticeLevel::Warning => &s.warning,
            NoticeLevel::Error => &s.error,
        };
        println!("{}", style.apply_to(&notice.message));
    }
}
