//! Template rendering with Tera

use crate::error::Result;
use serde::Serialize;
use tera::{Context, Tera};

pub const PAGE_TEMPLATE: &str = "index.html";
pub const METRICS_TEMPLATE: &str = "components/metrics.html";
pub const RESULTS_TEMPLATE: &str = "components/results.html";

/// Template renderer
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Create a new template renderer with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_template("base.html", include_str!("../templates/base.html"))?;
        tera.add_raw_template(PAGE_TEMPLATE, include_str!("../templates/index.html"))?;

        // Fragments swapped into the page by the controller
        tera.add_raw_template(
            METRICS_TEMPLATE,
            include_str!("../templates/components/metrics.html"),
        )?;
        tera.add_raw_template(
            RESULTS_TEMPLATE,
            include_str!("../templates/components/results.html"),
        )?;

        Ok(Self { tera })
    }

    /// Render a template with context
    pub fn render(&self, template: &str, context: &impl Serialize) -> Result<String> {
        let ctx = Context::from_serialize(context)?;
        Ok(self.tera.render(template, &ctx)?)
    }

    /// Render a template with a Tera Context
    pub fn render_with_context(&self, template: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template, context)?)
    }
}
