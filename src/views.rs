//! HTML for the public pages.

use std::fmt::Write;

use crate::entities::{color, gallery_image, mobile, slider_image};
use crate::services::catalog::{CatalogEntry, CatalogListing, ProductDetail};
use crate::services::specs::SpecSheets;

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn media_url(image_id: i32) -> String {
    format!("/media/{image_id}")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{}</title></head><body>\
<header><a href=\"/\">Mobile Store</a></header>\
{body}\
</body></html>",
        escape(title)
    )
}

fn stock_label(inventory: bool) -> &'static str {
    if inventory {
        "In stock"
    } else {
        "Out of stock"
    }
}

fn mobile_card(mobile: &mobile::Model, brand: Option<&str>) -> String {
    let brand = brand
        .map(|name| format!("<span class=\"brand\">{}</span> ", escape(name)))
        .unwrap_or_default();
    format!(
        "<li class=\"mobile\"><a href=\"/mobile/{slug}\">\
<img src=\"{img}\" alt=\"{name}\">{brand}<span class=\"model\">{name}</span></a>\
<span class=\"price\">{price}</span> <span class=\"stock\">{stock}</span></li>",
        slug = escape(&mobile.slug),
        img = media_url(mobile.image_default_id),
        name = escape(&mobile.model_name),
        price = mobile.price,
        stock = stock_label(mobile.inventory),
    )
}

fn slider(images: &[slider_image::Model]) -> String {
    if images.is_empty() {
        return String::new();
    }
    let mut html = String::from("<section class=\"slider\">");
    for slide in images {
        let _ = write!(
            html,
            "<figure><img src=\"{}\" alt=\"{title}\"><figcaption><h2>{title}</h2><p>{}</p></figcaption></figure>",
            media_url(slide.image_id),
            escape(&slide.description),
            title = escape(&slide.title),
        );
    }
    html.push_str("</section>");
    html
}

pub fn render_listing(listing: &CatalogListing) -> String {
    let mut body = slider(&listing.slider_images);
    body.push_str("<h1>Mobiles</h1><ul class=\"mobiles\">");
    for CatalogEntry { mobile, brand } in &listing.mobiles {
        body.push_str(&mobile_card(mobile, brand.as_ref().map(|b| b.name.as_str())));
    }
    if listing.mobiles.is_empty() {
        body.push_str("<li class=\"empty\">No mobiles available yet.</li>");
    }
    body.push_str("</ul>");
    page("Mobiles", &body)
}

fn colors(colors: &[color::Model]) -> String {
    if colors.is_empty() {
        return String::new();
    }
    let mut html = String::from("<h2>Colors</h2><ul class=\"colors\">");
    for color in colors {
        let _ = write!(
            html,
            "<li><span class=\"swatch\" style=\"background-color: {hex}\"></span>{} <code>{hex}</code></li>",
            escape(&color.color),
            hex = escape(&color.hex_code),
        );
    }
    html.push_str("</ul>");
    html
}

fn gallery(images: &[gallery_image::Model], alt: &str) -> String {
    if images.is_empty() {
        return String::new();
    }
    let mut html = String::from("<div class=\"gallery\">");
    for image in images {
        let _ = write!(
            html,
            "<img src=\"{}\" alt=\"{}\">",
            media_url(image.image_id),
            escape(alt)
        );
    }
    html.push_str("</div>");
    html
}

struct Section {
    title: &'static str,
    rows: Vec<(&'static str, String)>,
}

fn yes_no(value: bool) -> String {
    let label = if value { "Yes" } else { "No" };
    label.to_string()
}

fn spec_sections(specs: &SpecSheets) -> Vec<Section> {
    let mut sections = Vec::new();

    if let Some(s) = &specs.network {
        sections.push(Section {
            title: "Network",
            rows: vec![
                ("Technology", s.technology.clone()),
                ("2G bands", s.bands_2g.clone()),
                ("3G bands", s.bands_3g.clone()),
                ("4G bands", s.bands_4g.clone()),
                ("5G bands", s.bands_5g.clone()),
                ("Speed", s.speed.clone()),
            ],
        });
    }
    if let Some(s) = &specs.memory {
        sections.push(Section {
            title: "Memory",
            rows: vec![
                ("Card slot", yes_no(s.external)),
                ("Internal", s.internal.clone()),
                ("Other", s.other.clone()),
            ],
        });
    }
    if let Some(s) = &specs.body {
        sections.push(Section {
            title: "Body",
            rows: vec![
                ("Dimensions", s.dimensions.clone()),
                ("Weight", s.weight.clone()),
                ("Build", s.build.clone()),
                ("SIM", s.sim.clone()),
                ("Other", s.other.clone()),
            ],
        });
    }
    if let Some(s) = &specs.display {
        sections.push(Section {
            title: "Display",
            rows: vec![
                ("Type", s.type_display.clone()),
                ("Resolution", s.resolution.clone()),
                ("Size", s.screen_size.clone()),
                ("Shock resistant", yes_no(s.anti_shock)),
                ("Refresh rate", s.refresh_rate.clone()),
                ("Always on", yes_no(s.screen_always_on)),
                ("Other", s.other.clone()),
            ],
        });
    }
    if let Some(s) = &specs.function {
        sections.push(Section {
            title: "Platform",
            rows: vec![
                ("OS", s.os.clone()),
                ("CPU", s.cpu.clone()),
                ("GPU", s.gpu.clone()),
                ("Chipset", s.chipset.clone()),
                ("Other", s.other.clone()),
            ],
        });
    }
    if let Some(s) = &specs.main_camera {
        sections.push(Section {
            title: "Main camera",
            rows: vec![
                ("Camera", s.camera.clone()),
                ("Features", s.features.clone()),
                ("Video", s.video.clone()),
                ("Other", s.other.clone()),
            ],
        });
    }
    if let Some(s) = &specs.selfie_camera {
        sections.push(Section {
            title: "Selfie camera",
            rows: vec![
                ("Camera", s.camera.clone()),
                ("Features", s.features.clone()),
                ("Video", s.video.clone()),
                ("Other", s.other.clone()),
            ],
        });
    }
    if let Some(s) = &specs.sound {
        sections.push(Section {
            title: "Sound",
            rows: vec![
                ("Speakers", s.speaker_type.clone()),
                ("3.5mm jack", yes_no(s.jack_35mm)),
                ("Other", s.other.clone()),
            ],
        });
    }
    if let Some(s) = &specs.battery {
        sections.push(Section {
            title: "Battery",
            rows: vec![
                ("Type", s.battery_type.clone()),
                ("Charging", s.charging.clone()),
                ("Charge time", s.charge_time.clone()),
                ("Max wattage", s.max_wattage.clone()),
                ("Replaceable", yes_no(s.replaceable)),
                ("Wireless charging", yes_no(s.wireless_charge)),
                ("Fast charging", yes_no(s.fast_charge)),
                ("OTG", yes_no(s.otg_support)),
                ("Other", s.other.clone()),
            ],
        });
    }
    if let Some(s) = &specs.other_features {
        sections.push(Section {
            title: "Features",
            rows: vec![
                ("NFC", yes_no(s.nfc)),
                ("SIM card", s.simcard.clone()),
                ("5G backup", yes_no(s.backup_5g)),
                ("Multiple users", yes_no(s.multiple_user)),
                ("USB version", s.usb_version.to_string()),
                ("GPS", yes_no(s.gps)),
                ("Wi-Fi", s.wifi.clone()),
                ("Sensors", s.sensors.clone()),
                ("Voice command", yes_no(s.voice_command)),
                ("Hotspot", yes_no(s.hotspot)),
                ("Languages", s.language_support.to_string()),
                ("Bluetooth", s.bluetooth_version.clone()),
                ("Persian support", yes_no(s.support_persian)),
                ("Other", s.other.clone()),
            ],
        });
    }

    sections
}

fn spec_table(specs: &SpecSheets) -> String {
    let mut html = String::new();
    for section in spec_sections(specs) {
        let _ = write!(html, "<h3>{}</h3><table class=\"spec\">", section.title);
        for (label, value) in section.rows.iter().filter(|(_, v)| !v.is_empty()) {
            let _ = write!(html, "<tr><th>{label}</th><td>{}</td></tr>", escape(value));
        }
        html.push_str("</table>");
    }
    html
}

pub fn render_detail(detail: &ProductDetail) -> String {
    let mobile = &detail.mobile;
    let mut body = String::new();

    let _ = write!(
        body,
        "<article class=\"product\"><h1>{name}</h1>",
        name = escape(&mobile.model_name)
    );
    if let Some(brand) = &detail.brand {
        let _ = write!(body, "<p class=\"brand\">{}</p>", escape(&brand.name));
    }
    let _ = write!(
        body,
        "<img src=\"{img}\" alt=\"{name}\">\
<p class=\"price\">{price}</p><p class=\"stock\">{stock}</p>\
<p class=\"description\">{description}</p>\
<ul class=\"summary\">\
<li>Screen: {screen}</li><li>Battery: {battery}</li><li>Camera: {camera}</li>\
<li>Storage: {storage}</li><li>RAM: {ram} GB</li><li>OS: {os}</li><li>Released: {released}</li>\
</ul>",
        img = media_url(mobile.image_default_id),
        name = escape(&mobile.model_name),
        price = mobile.price,
        stock = stock_label(mobile.inventory),
        description = escape(&mobile.description),
        screen = escape(&mobile.screen_size),
        battery = escape(&mobile.battery_capacity),
        camera = escape(&mobile.camera_resolution),
        storage = escape(&mobile.storage_capacity),
        ram = mobile.ram,
        os = escape(&mobile.operating_system),
        released = mobile.release_date.format("%Y-%m-%d"),
    );

    body.push_str(&colors(&detail.colors));
    body.push_str(&gallery(&detail.gallery, &mobile.model_name));
    body.push_str(&spec_table(&detail.specs));
    body.push_str("</article>");

    if !detail.similar.is_empty() {
        body.push_str("<section class=\"similar\"><h2>Similar products</h2><ul class=\"mobiles\">");
        let brand = detail.brand.as_ref().map(|b| b.name.as_str());
        for similar in &detail.similar {
            body.push_str(&mobile_card(similar, brand));
        }
        body.push_str("</ul></section>");
    }

    page(&mobile.model_name, &body)
}

pub fn render_not_found(slug: &str) -> String {
    page(
        "Not found",
        &format!(
            "<h1>Not found</h1><p>No mobile matches <code>{}</code>.</p>",
            escape(slug)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::entities::brand;

    fn phone(id: i32, name: &str, slug: &str) -> mobile::Model {
        mobile::Model {
            id,
            brand_id: 1,
            model_name: name.into(),
            description: "A phone".into(),
            slug: slug.into(),
            inventory: id % 2 == 0,
            price: Decimal::new(49999, 2),
            screen_size: "6.1\"".into(),
            battery_capacity: "4000 mAh".into(),
            camera_resolution: "50 MP".into(),
            storage_capacity: "128 GB".into(),
            ram: 8,
            operating_system: "Android".into(),
            image_default_id: 9,
            release_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_listing_links_details_and_escapes_names() {
        let listing = CatalogListing {
            mobiles: vec![CatalogEntry {
                mobile: phone(1, "X <Pro>", "x-pro"),
                brand: Some(brand::Model {
                    id: 1,
                    name: "Acme".into(),
                }),
            }],
            slider_images: vec![],
        };
        let html = render_listing(&listing);
        assert!(html.contains("href=\"/mobile/x-pro\""));
        assert!(html.contains("X &lt;Pro&gt;"));
        assert!(html.contains("499.99"));
        assert!(html.contains("Out of stock"));
        assert!(!html.contains("class=\"slider\""));
    }

    #[test]
    fn test_empty_listing() {
        let html = render_listing(&CatalogListing {
            mobiles: vec![],
            slider_images: vec![],
        });
        assert!(html.contains("No mobiles available yet."));
    }

    #[test]
    fn test_detail_lists_similar_products() {
        let detail = ProductDetail {
            mobile: phone(1, "Alpha", "alpha"),
            brand: None,
            colors: vec![color::Model {
                id: 1,
                model_name: "Alpha".into(),
                color: "red".into(),
                image_id: 2,
                hex_code: "#FF0000".into(),
            }],
            gallery: vec![],
            specs: SpecSheets::default(),
            similar: vec![phone(2, "Beta", "beta")],
        };
        let html = render_detail(&detail);
        assert!(html.contains("<h1>Alpha</h1>"));
        assert!(html.contains("#FF0000"));
        assert!(html.contains("href=\"/mobile/beta\""));
        assert!(html.contains("Similar products"));
    }

    #[test]
    fn test_not_found_escapes_slug() {
        let html = render_not_found("<script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
