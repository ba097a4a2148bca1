//! Landing-page renderer.
//!
//! Pure content-to-HTML function. Every interpolated field is escaped;
//! the template only decides the color palette.

use crate::model::{PublishContent, TemplateId};

struct Theme {
    primary: &'static str,
    secondary: &'static str,
}

fn theme_for(template: TemplateId) -> Theme {
    match template {
        TemplateId::Culinary => Theme {
            primary: "#f97316",
            secondary: "#ea580c",
        },
        TemplateId::Fashion => Theme {
            primary: "#8b5cf6",
            secondary: "#7c3aed",
        },
        TemplateId::Service => Theme {
            primary: "#0ea5e9",
            secondary: "#0284c7",
        },
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders the one-page site for the given content.
pub fn render_landing_page(content: &PublishContent) -> String {
    let theme = theme_for(content.template_id);
    let business_name = escape_html(&content.business_name);
    let headline = escape_html(&content.headline);
    let story = escape_html(&content.story);
    let image_url = escape_html(&content.image_url);

    let digits: String = content.phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let whatsapp_link = format!("https://wa.me/{}?text=Halo", digits);

    let location_block = match content.location.as_deref() {
        Some(location) if !location.is_empty() => format!(
            "      <p class=\"location\">\u{1F4CD} {}</p>\n",
            escape_html(location)
        ),
        _ => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="id">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{business_name} - {headline}</title>
  <meta name="description" content="{story}">
  <meta property="og:title" content="{business_name}">
  <meta property="og:description" content="{story}">
  <meta property="og:image" content="{image_url}">
  <meta name="theme-color" content="{primary}">
  <style>
    * {{ font-family: 'Inter', sans-serif; margin: 0; }}
    .hero {{ background: linear-gradient(135deg, {primary} 0%, {secondary} 100%); min-height: 100vh; display: flex; align-items: center; justify-content: center; text-align: center; padding: 2rem; }}
    .hero img {{ width: 280px; height: 280px; object-fit: cover; border-radius: 1.5rem; }}
    .hero h1 {{ color: #fff; font-size: 2.5rem; }}
    .story {{ max-width: 42rem; margin: 0 auto; padding: 3rem 1.5rem; color: #374151; }}
    .cta {{ display: inline-block; background: {primary}; color: #fff; padding: 1rem 2rem; border-radius: 9999px; text-decoration: none; }}
  </style>
</head>
<body>
  <section class="hero">
    <div>
      <img src="{image_url}" alt="{business_name}">
      <h1>{headline}</h1>
      <p style="color:#fff">{business_name}</p>
    </div>
  </section>
  <section class="story">
    <h2>{business_name}</h2>
    <p>{story}</p>
{location_block}    <a class="cta" href="{whatsapp_link}">WhatsApp</a>
  </section>
</body>
</html>
"#,
        business_name = business_name,
        headline = headline,
        story = story,
        image_url = image_url,
        primary = theme.primary,
        secondary = theme.secondary,
        location_block = location_block,
        whatsapp_link = whatsapp_link,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> PublishContent {
        PublishContent {
            business_name: "Oase Coffee Lab".to_string(),
            headline: "Slow mornings, bold brews".to_string(),
            story: "Beans roasted in-house.".to_string(),
            phone: "+62 812-3456-789".to_string(),
            image_url: "https://example.com/photo.jpg".to_string(),
            location: Some("Jakarta".to_string()),
            template_id: TemplateId::Culinary,
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render_landing_page(&content()), render_landing_page(&content()));
    }

    #[test]
    fn test_fields_appear_in_output() {
        let html = render_landing_page(&content());
        assert!(html.contains("Oase Coffee Lab"));
        assert!(html.contains("Slow mornings, bold brews"));
        assert!(html.contains("Jakarta"));
        // Culinary palette.
        assert!(html.contains("#f97316"));
    }

    #[test]
    fn test_whatsapp_link_uses_digits_only() {
        let html = render_landing_page(&content());
        assert!(html.contains("https://wa.me/628123456789?text="));
    }

    #[test]
    fn test_html_is_escaped() {
        let mut c = content();
        c.business_name = "Tom & \"Jerry\" <Cafe>".to_string();
        let html = render_landing_page(&c);
        assert!(html.contains("Tom &amp; &quot;Jerry&quot; &lt;Cafe&gt;"));
        assert!(!html.contains("<Cafe>"));
    }

    #[test]
    fn test_missing_location_omits_block() {
        let mut c = content();
        c.location = None;
        let html = render_landing_page(&c);
        assert!(!html.contains("location"));
    }

    #[test]
    fn test_template_palettes_differ() {
        let mut c = content();
        c.template_id = TemplateId::Fashion;
        let fashion = render_landing_page(&c);
        c.template_id = TemplateId::Service;
        let service = render_landing_page(&c);
        assert!(fashion.contains("#8b5cf6"));
        assert!(service.contains("#0ea5e9"));
        assert_ne!(fashion, service);
    }
}
