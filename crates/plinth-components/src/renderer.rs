//! Component renderer.
//!
//! Resolves a component, coerces its arguments and drives its asynchronous
//! render (including nested children) to a single HTML string.

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::ComponentCatalog;
use crate::coerce::coerce;
use crate::component::{instantiate, Component, ComponentDescriptor, ComponentError, ComponentRef, ComponentType};
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::templates::{html_escape, TemplateEngine};
use crate::value::{Args, Parameters};

/// Deepest allowed component nesting.
const MAX_DEPTH: usize = 64;

/// How component output is emitted. Neither mode is interactive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Plain markup
    #[default]
    Static,
    /// Markup wrapped in `<!--plinth:Name-->` boundary comments
    Annotated,
}

/// Renders catalog components to HTML strings.
#[derive(Clone)]
pub struct ComponentRenderer {
    catalog: Arc<ComponentCatalog>,
    templates: Arc<TemplateEngine>,
    mode: RenderMode,
}

impl ComponentRenderer {
    /// Create a renderer over the given catalog with the built-in templates.
    pub fn new(catalog: Arc<ComponentCatalog>) -> Self {
        Self {
            catalog,
            templates: Arc::new(TemplateEngine::new()),
            mode: RenderMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Render a component referenced by type or by name.
    pub async fn render(
        &self,
        component: &ComponentRef,
        context: &RenderContext,
        args: Option<&Args>,
    ) -> Result<String, RenderError> {
        let descriptor = self.catalog.resolve_ref(component)?;
        self.render_descriptor(descriptor, context, args).await
    }

    /// Render a component by simple or fully-qualified name.
    pub async fn render_named(
        &self,
        name: &str,
        context: &RenderContext,
        args: Option<&Args>,
    ) -> Result<String, RenderError> {
        let descriptor = self.catalog.resolve(name)?;
        self.render_descriptor(descriptor, context, args).await
    }

    /// Render a registered component type.
    pub async fn render_type<C: ComponentType>(
        &self,
        context: &RenderContext,
        args: Option<&Args>,
    ) -> Result<String, RenderError> {
        self.render(&ComponentRef::of::<C>(), context, args).await
    }

    /// Render an already-resolved descriptor.
    pub async fn render_descriptor(
        &self,
        descriptor: &ComponentDescriptor,
        context: &RenderContext,
        args: Option<&Args>,
    ) -> Result<String, RenderError> {
        let params = match args {
            Some(args) => coerce(descriptor, args)?,
            None => Parameters::new(),
        };

        let component = descriptor.instantiate(&params);
        let mut scope = RenderScope::new(context, &self.templates, self.mode);
        scope
            .render_component(
                descriptor.simple_name(),
                descriptor.qualified_name(),
                component.as_ref(),
            )
            .await?;

        Ok(scope.into_markup())
    }
}

/// Output buffer and ambient state for one component render.
pub struct RenderScope<'a> {
    context: &'a RenderContext,
    templates: &'a TemplateEngine,
    mode: RenderMode,
    depth: usize,
    out: String,
}

impl<'a> RenderScope<'a> {
    fn new(context: &'a RenderContext, templates: &'a TemplateEngine, mode: RenderMode) -> Self {
        Self {
            context,
            templates,
            mode,
            depth: 0,
            out: String::new(),
        }
    }

    pub fn context(&self) -> &RenderContext {
        self.context
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Append markup verbatim.
    pub fn write_raw(&mut self, markup: &str) {
        self.out.push_str(markup);
    }

    /// Append text, escaping HTML special characters.
    pub fn write_text(&mut self, text: &str) {
        self.out.push_str(&html_escape(text));
    }

    /// Render a named template to a string without appending it.
    pub fn render_template<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, ComponentError> {
        Ok(self.templates.render(name, ctx)?)
    }

    /// Render a named template and append the result.
    pub fn write_template<S: Serialize>(&mut self, name: &str, ctx: S) -> Result<(), ComponentError> {
        let html = self.render_template(name, ctx)?;
        self.out.push_str(&html);
        Ok(())
    }

    /// Render a child component and return its markup.
    ///
    /// The child shares this scope's context and mode; its output is not
    /// appended, so the parent decides where it goes.
    pub async fn render_child<C: ComponentType>(&mut self, params: Parameters) -> Result<String, RenderError> {
        let component = instantiate::<C>(&params);
        let mut child = RenderScope {
            context: self.context,
            templates: self.templates,
            mode: self.mode,
            depth: self.depth + 1,
            out: String::new(),
        };
        child
            .render_component(C::NAME, C::QUALIFIED_NAME, &component)
            .await?;
        Ok(child.out)
    }

    async fn render_component(
        &mut self,
        name: &str,
        qualified_name: &str,
        component: &dyn Component,
    ) -> Result<(), RenderError> {
        if self.depth > MAX_DEPTH {
            return Err(RenderError::RenderFailure {
                component: qualified_name.to_string(),
                source: format!("component nesting exceeds {MAX_DEPTH} levels").into(),
            });
        }

        if self.mode == RenderMode::Annotated {
            self.out.push_str(&format!("<!--plinth:{name}-->"));
        }

        component
            .render(self)
            .await
            .map_err(|source| RenderError::RenderFailure {
                component: qualified_name.to_string(),
                source,
            })?;

        if self.mode == RenderMode::Annotated {
            self.out.push_str(&format!("<!--/plinth:{name}-->"));
        }

        Ok(())
    }

    fn into_markup(self) -> String {
        self.out
    }
}
