//! Host document generation.
//!
//! One placeholder container per registry entry, nested in the fixed root
//! container, followed by the module reference and a one-shot DOM-ready hook
//! that calls `initializeComponents(root, {})`.

use crate::registry::Registry;
use crate::utils::{escape_html, js_string_literal};
use crate::{COMPONENT_ATTR, ROOT_CONTAINER_ID};

/// Generate the placeholder containers, one per line, in registry order.
fn generate_containers(registry: &Registry) -> String {
    if registry.is_empty() {
        return format!(r#"<div id="{ROOT_CONTAINER_ID}"></div>"#);
    }

    let mut out = format!("<div id=\"{ROOT_CONTAINER_ID}\">\n");
    for descriptor in registry {
        out.push_str(&format!(
            "    <div {}=\"{}\"></div>\n",
            COMPONENT_ATTR,
            escape_html(&descriptor.name)
        ));
    }
    out.push_str("  </div>");
    out
}

/// The DOM-ready hook. Runs at most once per loaded document.
fn generate_boot_script() -> String {
    format!(
        r#"<script>
    (function () {{
      function boot() {{
        const root = document.getElementById({root});
        if (root) {{
          initializeComponents(root, {{}});
        }}
      }}
      if (document.readyState === 'loading') {{
        document.addEventListener('DOMContentLoaded', boot, {{ once: true }});
      }} else {{
        boot();
      }}
    }})();
  </script>"#,
        root = js_string_literal(ROOT_CONTAINER_ID)
    )
}

/// Generate the host document.
///
/// `module_src` is the file name of the registry module, referenced relative
/// to the document.
pub fn generate_html(registry: &Registry, module_src: &str, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
</head>
<body>
  {containers}
  <script src="./{module_src}"></script>
  {boot}
</body>
</html>
"#,
        title = escape_html(title),
        containers = generate_containers(registry),
        module_src = escape_html(module_src),
        boot = generate_boot_script(),
    )
}
