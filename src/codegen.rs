//! Registry module generation.
//!
//! Emits one classic script that defines `ComponentRegistry` (name → render
//! function) and `initializeComponents(container, props)` on `globalThis`.
//!
//! The runtime re-parses placeholders itself with [`PLACEHOLDER_PATTERN`];
//! `prop_names` on the descriptor is metadata only.

use crate::parse::PLACEHOLDER_PATTERN;
use crate::registry::Registry;
use crate::style::aggregate_styles;
use crate::utils::{escape_js_template_literal, js_string_literal};
use crate::{ComponentDescriptor, COMPONENT_ATTR, CONTAINER_PRECONDITION_MESSAGE};

// ---------------------------------------------------------------------------
// Render functions
// ---------------------------------------------------------------------------

/// Generate the `render(container, props)` function of one component.
///
/// The template is embedded as a template literal and substituted at call
/// time; the result replaces the container's content. Indented for its slot
/// inside the registry object, since the literal itself must not be touched.
pub fn generate_render_function(descriptor: &ComponentDescriptor) -> String {
    format!(
        r#"function render(container, props) {{
      assertContainer(container);
      container.innerHTML = renderTemplate(`{}`, props);
    }}"#,
        escape_js_template_literal(&descriptor.template_text)
    )
}

fn generate_registry_object(registry: &Registry) -> String {
    if registry.is_empty() {
        return "const ComponentRegistry = {};".to_string();
    }

    let mut out = String::from("const ComponentRegistry = {\n");
    for descriptor in registry {
        out.push_str(&format!(
            "    {}: {},\n",
            js_string_literal(&descriptor.name),
            generate_render_function(descriptor)
        ));
    }
    out.push_str("  };");
    out
}

fn generate_order_array(registry: &Registry) -> String {
    let names: Vec<String> = registry
        .iter()
        .map(|d| js_string_literal(&d.name))
        .collect();
    format!("const ComponentOrder = [{}];", names.join(", "))
}

// ---------------------------------------------------------------------------
// Module
// ---------------------------------------------------------------------------

/// Generate the full registry module for a run.
///
/// Output depends only on the registry contents and order.
pub fn generate_module(registry: &Registry) -> String {
    let styles = escape_js_template_literal(&aggregate_styles(registry));

    format!(
        r#"// Generated by zmx. Do not edit.
(function () {{
  'use strict';

  const PLACEHOLDER = new RegExp({placeholder}, 'g');
  const COMPONENT_ATTR = {attr};
  const STYLES = `{styles}`;
  let stylesInjected = false;

  function assertContainer(container) {{
    if (!container || typeof HTMLElement === 'undefined' || !(container instanceof HTMLElement)) {{
      throw new Error({message});
    }}
  }}

  function renderTemplate(template, props) {{
    return template.replace(PLACEHOLDER, function (match, body) {{
      const separator = body.indexOf(':');
      const name = (separator === -1 ? body : body.slice(0, separator)).trim();
      const fallback = separator === -1 ? '' : body.slice(separator + 1).trim();
      if (props != null && Object.prototype.hasOwnProperty.call(props, name)) {{
        const value = props[name];
        if (value !== undefined && value !== null && value !== '') {{
          return String(value);
        }}
      }}
      return fallback;
    }});
  }}

  {registry}

  {order}

  function injectStyles() {{
    if (stylesInjected || STYLES === '') {{
      return;
    }}
    stylesInjected = true;
    const styleElement = document.createElement('style');
    styleElement.textContent = STYLES;
    document.head.appendChild(styleElement);
  }}

  function initializeComponents(container, props) {{
    assertContainer(container);
    const shared = props || {{}};
    injectStyles();
    for (let i = 0; i < ComponentOrder.length; i++) {{
      const name = ComponentOrder[i];
      const candidates = container.querySelectorAll('[' + COMPONENT_ATTR + ']');
      for (let j = 0; j < candidates.length; j++) {{
        if (candidates[j].getAttribute(COMPONENT_ATTR) === name) {{
          ComponentRegistry[name](candidates[j], shared);
        }}
      }}
    }}
  }}

  globalThis.ComponentRegistry = ComponentRegistry;
  globalThis.initializeComponents = initializeComponents;
}})();
"#,
        placeholder = js_string_literal(PLACEHOLDER_PATTERN),
        attr = js_string_literal(COMPONENT_ATTR),
        styles = styles,
        message = js_string_literal(CONTAINER_PRECONDITION_MESSAGE),
        registry = generate_registry_object(registry),
        order = generate_order_array(registry),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComponentDescriptor;
    use pretty_assertions::assert_eq;

    fn descriptor(name: &str, template: &str, style: &str) -> ComponentDescriptor {
        ComponentDescriptor {
            name: name.to_string(),
            template_text: template.to_string(),
            style_text: style.to_string(),
            prop_names: crate::parse::extract_props(template),
        }
    }

    #[test]
    fn test_render_function_embeds_template() {
        let render = generate_render_function(&descriptor("greet", "Hello {name:World}!", ""));
        assert_eq!(
            render,
            "function render(container, props) {\n      assertContainer(container);\n      container.innerHTML = renderTemplate(`Hello {name:World}!`, props);\n    }"
        );
    }

    #[test]
    fn test_render_function_escapes_literal_breakers() {
        let render = generate_render_function(&descriptor("x", "a`b ${c}", ""));
        assert!(render.contains("renderTemplate(`a\\`b \\${c}`, props)"));
    }

    #[test]
    fn test_module_entries_follow_registry_order() {
        let mut registry = Registry::new();
        registry.insert(descriptor("main", "<p>m</p>", ""));
        registry.insert(descriptor("alpha", "<p>a</p>", ""));
        registry.insert(descriptor("zeta", "<p>z</p>", ""));
        let module = generate_module(&registry);

        let main = module.find("\"main\": function render").unwrap();
        let alpha = module.find("\"alpha\": function render").unwrap();
        let zeta = module.find("\"zeta\": function render").unwrap();
        assert!(main < alpha && alpha < zeta);
        assert!(module.contains(r#"const ComponentOrder = ["main", "alpha", "zeta"];"#));
    }

    #[test]
    fn test_multiline_template_kept_verbatim() {
        let template = "\n  <h1>{title}</h1>\n  <p>body</p>\n";
        let mut registry = Registry::new();
        registry.insert(descriptor("card", template, ""));
        let module = generate_module(&registry);
        assert!(module.contains(&format!("renderTemplate(`{template}`, props)")));
    }

    #[test]
    fn test_module_carries_precondition_and_entry_point() {
        let module = generate_module(&Registry::new());
        assert!(module.contains(r#"throw new Error("A valid container element must be provided.");"#));
        assert!(module.contains("globalThis.ComponentRegistry = ComponentRegistry;"));
        assert!(module.contains("globalThis.initializeComponents = initializeComponents;"));
        assert!(module.contains(r#"new RegExp("\\{([^}]+)\\}", 'g')"#));
    }

    #[test]
    fn test_empty_registry_module() {
        let module = generate_module(&Registry::new());
        assert!(module.contains("const ComponentRegistry = {};"));
        assert!(module.contains("const ComponentOrder = [];"));
        assert!(module.contains("const STYLES = ``;"));
    }

    #[test]
    fn test_module_embeds_aggregated_styles() {
        let mut registry = Registry::new();
        registry.insert(descriptor("a", "", ".a{}"));
        registry.insert(descriptor("b", "", ""));
        registry.insert(descriptor("c", "", ".c{}"));
        let module = generate_module(&registry);
        assert!(module.contains("const STYLES = `.a{}\n.c{}`;"));
    }

    #[test]
    fn test_script_section_not_emitted() {
        let source = crate::parse::extract_sections(
            "x",
            "<template>t</template><script>window.leak = 1;</script>",
        );
        let mut registry = Registry::new();
        registry.insert(ComponentDescriptor::from_source(&source));
        assert!(!generate_module(&registry).contains("window.leak"));
    }
}
