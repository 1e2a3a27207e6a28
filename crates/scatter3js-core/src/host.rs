//! Widget hosts
//!
//! A host receives a finished payload and is responsible for displaying it.
//! The crate ships [`HtmlDocumentHost`], which embeds the payload in a
//! standalone HTML page the way browser widget frameworks do: a sized
//! container element plus a JSON data block tied to it by element id.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::builder::PlotDataBuilder;
use crate::error::ScatterResult;
use crate::options::PlotOptions;
use crate::payload::WidgetPayload;
use crate::points::Coordinates;

/// Widget name registered with the browser binding
pub const WIDGET_NAME: &str = "scatterplotThree";

/// How the container sizes itself inside its page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingPolicy {
    /// Padding around the widget in pixels
    pub padding: u32,

    /// Fill the browser window when no explicit size is given
    pub browser_fill: bool,
}

impl Default for SizingPolicy {
    fn default() -> Self {
        Self {
            padding: 0,
            browser_fill: true,
        }
    }
}

/// Everything a host needs to display one widget
#[derive(Clone, Debug)]
pub struct WidgetRequest<'a> {
    pub name: &'a str,
    pub payload: &'a WidgetPayload,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub sizing: SizingPolicy,
}

/// Displays widget payloads
pub trait WidgetHost {
    type Output;

    fn create_widget(&self, request: WidgetRequest<'_>) -> ScatterResult<Self::Output>;
}

/// Build a scatterplot and hand it to a host.
///
/// The host is only called once the payload has been fully built.
pub fn render_scatterplot<H: WidgetHost>(
    coords: impl Into<Coordinates>,
    options: PlotOptions,
    host: &H,
) -> ScatterResult<H::Output> {
    let spec = PlotDataBuilder::new(options).build(coords)?;
    let payload = spec.to_payload()?;
    host.create_widget(WidgetRequest {
        name: WIDGET_NAME,
        payload: &payload,
        width: spec.width(),
        height: spec.height(),
        sizing: SizingPolicy::default(),
    })
}

/// A rendered standalone HTML page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlDocument {
    /// Id of the widget container element
    pub element_id: String,
    pub html: String,
}

impl HtmlDocument {
    /// Write the page to disk
    pub fn write_to(&self, path: impl AsRef<Path>) -> ScatterResult<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.html)?;
        tracing::info!(path = %path.display(), element = %self.element_id, "wrote widget document");
        Ok(())
    }
}

/// Host that renders payloads into standalone HTML pages
#[derive(Clone, Debug)]
pub struct HtmlDocumentHost {
    /// Id of the container element
    pub element_id: String,

    /// Page title
    pub title: String,

    /// Script URLs loaded in the page head (three.js, the widget binding)
    pub scripts: Vec<String>,
}

impl Default for HtmlDocumentHost {
    fn default() -> Self {
        Self {
            element_id: "scatterplot3js".to_string(),
            title: WIDGET_NAME.to_string(),
            scripts: Vec::new(),
        }
    }
}

impl HtmlDocumentHost {
    /// Set the container element id
    pub fn with_element_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = id.into();
        self
    }

    /// Set the page title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add a script URL to the page head
    pub fn with_script(mut self, src: impl Into<String>) -> Self {
        self.scripts.push(src.into());
        self
    }
}

impl WidgetHost for HtmlDocumentHost {
    type Output = HtmlDocument;

    fn create_widget(&self, request: WidgetRequest<'_>) -> ScatterResult<HtmlDocument> {
        let (width, height) = container_size(&request);
        let json = request.payload.to_json()?.replace("</", "<\\/");
        let id = escape_html(&self.element_id);

        let scripts: String = self
            .scripts
            .iter()
            .map(|src| format!("<script src=\"{}\"></script>\n", escape_html(src)))
            .collect();

        let html = format!(
            "<!DOCTYPE html>\n\
             <html>\n\
             <head>\n\
             <meta charset=\"utf-8\"/>\n\
             <title>{title}</title>\n\
             {scripts}\
             </head>\n\
             <body style=\"margin:0;padding:{padding}px;\">\n\
             <div id=\"{id}\" class=\"{name} html-widget\" style=\"width:{width};height:{height};\"></div>\n\
             <script type=\"application/json\" data-for=\"{id}\">{json}</script>\n\
             </body>\n\
             </html>\n",
            title = escape_html(&self.title),
            padding = request.sizing.padding,
            name = escape_html(request.name),
        );

        Ok(HtmlDocument {
            element_id: self.element_id.clone(),
            html,
        })
    }
}

/// CSS width and height of the container
fn container_size(request: &WidgetRequest<'_>) -> (String, String) {
    let fill = request.sizing.browser_fill;
    let width = match request.width {
        Some(px) => format!("{px}px"),
        None if fill => "100%".to_string(),
        None => "960px".to_string(),
    };
    let height = match request.height {
        Some(px) => format!("{px}px"),
        None if fill => "100vh".to_string(),
        None => "500px".to_string(),
    };
    (width, height)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn payload() -> WidgetPayload {
        WidgetPayload {
            data: vec![0.0, 0.5, 1.0],
            options: Map::new(),
            pch: "@".to_string(),
            bg: "white".to_string(),
        }
    }

    #[test]
    fn test_sizing_policy_default() {
        let policy = SizingPolicy::default();
        assert_eq!(policy.padding, 0);
        assert!(policy.browser_fill);
    }

    #[test]
    fn test_container_size() {
        let payload = payload();
        let mut request = WidgetRequest {
            name: WIDGET_NAME,
            payload: &payload,
            width: Some(640),
            height: None,
            sizing: SizingPolicy::default(),
        };
        assert_eq!(container_size(&request), ("640px".to_string(), "100vh".to_string()));

        request.sizing.browser_fill = false;
        request.width = None;
        assert_eq!(container_size(&request), ("960px".to_string(), "500px".to_string()));
    }

    #[test]
    fn test_html_document() {
        let payload = payload();
        let host = HtmlDocumentHost::default()
            .with_element_id("plot-1")
            .with_script("lib/three.min.js");
        let doc = host
            .create_widget(WidgetRequest {
                name: WIDGET_NAME,
                payload: &payload,
                width: Some(400),
                height: Some(300),
                sizing: SizingPolicy::default(),
            })
            .unwrap();

        assert_eq!(doc.element_id, "plot-1");
        assert!(doc.html.contains("<div id=\"plot-1\" class=\"scatterplotThree html-widget\""));
        assert!(doc.html.contains("width:400px;height:300px;"));
        assert!(doc.html.contains("<script src=\"lib/three.min.js\"></script>"));
        assert!(doc.html.contains("data-for=\"plot-1\">{\"data\":[0.0,0.5,1.0]"));
    }

    #[test]
    fn test_script_close_tag_escaped() {
        let mut payload = payload();
        payload
            .options
            .insert("labels".to_string(), serde_json::json!(["</script>"]));
        let doc = HtmlDocumentHost::default()
            .create_widget(WidgetRequest {
                name: WIDGET_NAME,
                payload: &payload,
                width: None,
                height: None,
                sizing: SizingPolicy::default(),
            })
            .unwrap();
        assert!(doc.html.contains("<\\/script>"));
        assert_eq!(doc.html.matches("</script>").count(), 1);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
