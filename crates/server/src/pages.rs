//! Server-rendered pages. Element ids, classes and data attributes here are the
//! contract the browser page controller binds to.

use shared::{
    domain::ContactField,
    protocol::{about_route, contact_route, home_route, static_route},
};

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Home,
    About,
    Contact,
    None,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn nav_link(label: &str, href: &str, active: bool) -> String {
    let class = if active { "nav-link active" } else { "nav-link" };
    format!(r#"<li class="nav-item"><a class="{class}" href="{href}">{label}</a></li>"#)
}

pub fn layout(site_name: &str, title: &str, nav: Nav, main: &str) -> String {
    let site = escape_html(site_name);
    let title = escape_html(title);
    let static_root = static_route();
    let links = [
        nav_link("Home", home_route(), nav == Nav::Home),
        nav_link("About", about_route(), nav == Nav::About),
        nav_link("Contact", contact_route(), nav == Nav::Contact),
    ]
    .concat();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - {site}</title>
<link rel="stylesheet" href="{BOOTSTRAP_CSS}">
<link rel="stylesheet" href="{static_root}/css/style.css">
</head>
<body>
<nav class="navbar navbar-expand-lg navbar-dark bg-dark">
<div class="container">
<a class="navbar-brand" href="{home}">{site}</a>
<ul class="navbar-nav">{links}</ul>
</div>
</nav>
<main class="container py-4">
{main}
</main>
<footer class="text-center text-muted py-3">{site}</footer>
<script src="{BOOTSTRAP_JS}"></script>
<script type="module">import init from "{static_root}/pkg/web_client.js"; init();</script>
</body>
</html>
"#,
        home = home_route(),
    )
}

pub fn home_page(site_name: &str) -> String {
    let main = r##"<section class="p-5 mb-4 bg-light rounded-3">
<h1 class="display-5">Welcome</h1>
<p class="lead">A small server-rendered site with a Rust page controller.</p>
<button type="button" class="btn btn-outline-primary" data-bs-toggle="tooltip" title="Rendered by the server, wired up in the browser">Hover me</button>
<a class="btn btn-link" href="#features">See what it does</a>
</section>
<section id="features" class="mb-4">
<h2>Features</h2>
<ul>
<li>Server-rendered pages</li>
<li>JSON endpoint at <code>/api/data</code></li>
<li>Contact form with client-side checks</li>
</ul>
</section>
<section class="mb-4">
<h2>API data</h2>
<button type="button" class="btn btn-secondary" data-action="load-api-data">Load API Data</button>
<div id="api-data" class="alert alert-info mt-3" style="display: none;">
<pre id="api-content" class="mb-0"></pre>
</div>
</section>"##;
    layout(site_name, "Home", Nav::Home, main)
}

pub fn about_page(site_name: &str) -> String {
    let main = r##"<h1 id="top">About</h1>
<p>Pages are rendered on the server. Behaviour in the browser comes from a page controller compiled to WebAssembly.</p>
<a href="#top">Back to top</a>"##;
    layout(site_name, "About", Nav::About, main)
}

pub fn contact_page(site_name: &str, submitted: bool) -> String {
    let notice = if submitted {
        r#"<div class="alert alert-success alert-dismissible fade show" role="alert">Thank you for your message! We will get back to you soon.<button type="button" class="btn-close" data-bs-dismiss="alert"></button></div>"#
    } else {
        ""
    };

    let field = |field: ContactField, label: &str, control: &str| {
        let id = field.element_id();
        format!(
            r#"<div class="mb-3"><label for="{id}" class="form-label">{label}</label>{control}<div class="invalid-feedback">{feedback}</div></div>"#,
            feedback = field.requirement(),
        )
    };
    let fields = [
        field(
            ContactField::Name,
            "Name",
            r#"<input type="text" class="form-control" id="name" name="name" required>"#,
        ),
        field(
            ContactField::Email,
            "Email",
            r#"<input type="email" class="form-control" id="email" name="email" required>"#,
        ),
        field(
            ContactField::Message,
            "Message",
            r#"<textarea class="form-control" id="message" name="message" rows="5" required></textarea>"#,
        ),
    ]
    .concat();

    let action = contact_route();
    let main = format!(
        r#"<h1>Contact</h1>
{notice}
<form method="POST" action="{action}" novalidate>
{fields}
<button type="submit" class="btn btn-primary">Send Message</button>
</form>"#
    );
    layout(site_name, "Contact", Nav::Contact, &main)
}

pub fn not_found_page(site_name: &str) -> String {
    let main = format!(
        r#"<div class="text-center py-5"><h1 class="display-1">404</h1><p class="lead">Page Not Found</p><a class="btn btn-primary" href="{}">Go Home</a></div>"#,
        home_route()
    );
    layout(site_name, "Page Not Found", Nav::None, &main)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_site_name() {
        let page = layout("<b>&co</b>", "T", Nav::None, "");
        assert!(page.contains("&lt;b&gt;&amp;co&lt;/b&gt;"));
        assert!(!page.contains("<b>&co</b>"));
    }

    #[test]
    fn home_page_carries_loader_contract() {
        let page = home_page("Site");
        assert!(page.contains(r#"id="api-data""#));
        assert!(page.contains(r#"id="api-content""#));
        assert!(page.contains(r#"data-action="load-api-data""#));
        assert!(page.contains(r#"data-bs-toggle="tooltip""#));
        assert!(page.contains(r##"href="#features""##));
        assert!(page.contains(r#"class="nav-link active" href="/""#));
    }

    #[test]
    fn in_page_links_have_targets() {
        for (page, anchor) in [(home_page("Site"), "features"), (about_page("Site"), "top")] {
            assert!(page.contains(&format!(r##"href="#{anchor}""##)));
            assert!(page.contains(&format!(r#"id="{anchor}""#)), "no #{anchor} target");
        }
    }

    #[test]
    fn contact_page_renders_post_form_with_three_fields() {
        let page = contact_page("Site", false);
        assert!(page.contains(r#"<form method="POST" action="/contact""#));
        for field in ContactField::ALL {
            assert!(page.contains(&format!(r#"id="{}""#, field.element_id())));
        }
        assert!(!page.contains("alert-success"));
        assert!(contact_page("Site", true).contains("alert-dismissible fade show"));
    }
}
