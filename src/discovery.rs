//! Declaration discovery and component classification.
//!
//! Walks a parsed program once, depth-first. Each top-level statement runs
//! through the classifiers in priority order — function-style component,
//! class-style component, interface, type alias — and the first success
//! wins. Named results are registered in the shared registry as they are
//! compiled; export metadata is collected along the way and joined against
//! the discovered components only after the whole walk, so components and
//! their `export default` may appear in either order.

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPattern, Class, Declaration, ExportDefaultDeclarationKind, Expression, ModuleExportName,
    Program, Statement, TSInterfaceDeclaration, TSModuleDeclarationBody, TSType,
    TSTypeAliasDeclaration, VariableDeclaration,
};
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::Serialize;

#[cfg(feature = "napi")]
use napi_derive::napi;

use crate::compile::{type_reference_name, Compiler};
use crate::generator::GenFn;
use crate::registry::TypeRegistry;

/// A compiled binding: optionally named, plus its generator.
pub struct Generator {
    pub identifier: Option<String>,
    pub get: GenFn,
}

/// A discovered UI component: the compiled generator for its props type and
/// its export classification.
pub struct ReactExport {
    pub name: Option<String>,
    pub is_default: bool,
    pub props: GenFn,
}

/// One `export` statement or modifier encountered during the walk.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub name: String,
    pub is_default: bool,
}

/// Everything compiled from one source unit. Built fresh per compilation;
/// nothing persists across invocations.
#[derive(Default)]
pub struct CompiledUnit {
    pub generators: Vec<Generator>,
    pub react_exports: Vec<ReactExport>,
    pub exports: Vec<ExportRecord>,
    pub registry: TypeRegistry,
}

impl CompiledUnit {
    /// The component flagged default, if any. At most one per unit.
    pub fn default_react_export(&self) -> Option<&ReactExport> {
        self.react_exports
            .iter()
            .find(|component| component.is_default)
    }
}

/// Compile a parsed program. The tree is the front end's output; this
/// function never sees source text.
pub fn compile_program(program: &Program<'_>) -> CompiledUnit {
    let registry = TypeRegistry::new();
    let mut scanner = DeclarationScanner {
        compiler: Compiler::new(registry.clone()),
        registry: registry.clone(),
        generators: Vec::new(),
        react_exports: Vec::new(),
        exports: Vec::new(),
    };
    scanner.scan_statements(&program.body);
    scanner.join_default_exports();

    CompiledUnit {
        generators: scanner.generators,
        react_exports: scanner.react_exports,
        exports: scanner.exports,
        registry,
    }
}

/// Front-end boundary: parse `source` with oxc and compile the resulting
/// tree. Parse failures surface here and nowhere else in the crate.
pub fn compile_source(file_name: &str, source: &str) -> Result<CompiledUnit, String> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(file_name)
        .unwrap_or_default()
        .with_typescript(true);
    let parsed = Parser::new(&allocator, source, source_type).parse();
    if !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .iter()
            .map(|error| error.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(format!("failed to parse {file_name}: {message}"));
    }
    Ok(compile_program(&parsed.program))
}

struct DeclarationScanner {
    compiler: Compiler,
    registry: TypeRegistry,
    generators: Vec<Generator>,
    react_exports: Vec<ReactExport>,
    exports: Vec<ExportRecord>,
}

impl DeclarationScanner {
    fn scan_statements(&mut self, statements: &[Statement<'_>]) {
        for statement in statements {
            self.scan_statement(statement);
        }
    }

    fn scan_statement(&mut self, statement: &Statement<'_>) {
        match statement {
            Statement::ExportNamedDeclaration(export) => {
                if let Some(declaration) = &export.declaration {
                    self.classify_declaration(declaration, false);
                    for name in declaration_names(declaration) {
                        self.exports.push(ExportRecord {
                            name,
                            is_default: false,
                        });
                    }
                }
                for specifier in &export.specifiers {
                    let exported = module_export_name(&specifier.exported);
                    let local = module_export_name(&specifier.local);
                    if exported == "default" {
                        // `export { Component as default }`
                        self.exports.push(ExportRecord {
                            name: local,
                            is_default: true,
                        });
                    } else {
                        self.exports.push(ExportRecord {
                            name: exported,
                            is_default: false,
                        });
                    }
                }
            }
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                    // default-ness is read off the class's own modifiers
                    self.try_class_component(class, true);
                    if let Some(id) = &class.id {
                        self.exports.push(ExportRecord {
                            name: id.name.to_string(),
                            is_default: true,
                        });
                    }
                }
                other => {
                    // `export default Component;` — joined after the walk
                    if let Some(Expression::Identifier(ident)) = other.as_expression() {
                        self.exports.push(ExportRecord {
                            name: ident.name.to_string(),
                            is_default: true,
                        });
                    }
                }
            },
            Statement::VariableDeclaration(declaration) => {
                self.try_function_component(declaration, false);
            }
            Statement::ClassDeclaration(class) => {
                self.try_class_component(class, false);
            }
            Statement::TSInterfaceDeclaration(interface) => self.compile_interface(interface),
            Statement::TSTypeAliasDeclaration(alias) => self.compile_type_alias(alias),
            Statement::TSModuleDeclaration(module) => {
                // statements nest inside namespaces; recurse
                if let Some(TSModuleDeclarationBody::TSModuleBlock(block)) = &module.body {
                    self.scan_statements(&block.body);
                }
            }
            _ => {}
        }
    }

    fn classify_declaration(&mut self, declaration: &Declaration<'_>, is_default: bool) {
        match declaration {
            Declaration::VariableDeclaration(variable) => {
                self.try_function_component(variable, is_default);
            }
            Declaration::ClassDeclaration(class) => {
                self.try_class_component(class, is_default);
            }
            Declaration::TSInterfaceDeclaration(interface) => self.compile_interface(interface),
            Declaration::TSTypeAliasDeclaration(alias) => self.compile_type_alias(alias),
            _ => {}
        }
    }

    /// Classifier 1: a variable annotated with a generic stateless-component
    /// type, e.g. `const C: React.SFC<Props> = ...`. The single type
    /// argument — a props type name or an inline shape — becomes the
    /// component's props generator.
    fn try_function_component(
        &mut self,
        declaration: &VariableDeclaration<'_>,
        is_default: bool,
    ) -> bool {
        let mut matched = false;
        for declarator in &declaration.declarations {
            let name = match &declarator.id {
                BindingPattern::BindingIdentifier(ident) => Some(ident.name.to_string()),
                _ => None,
            };
            let Some(annotation) = &declarator.type_annotation else {
                continue;
            };
            let TSType::TSTypeReference(reference) = &annotation.type_annotation else {
                continue;
            };
            let Some(reference_name) = type_reference_name(&reference.type_name) else {
                continue;
            };
            if !is_stateless_component_type(&reference_name) {
                continue;
            }
            let Some(type_arguments) = &reference.type_arguments else {
                continue;
            };
            let Some(props_type) = type_arguments.params.first() else {
                continue;
            };
            // inline props shapes are seeded with the component's own name
            let path = name.clone().unwrap_or_default();
            let Some(props) = self.compiler.compile_type(props_type, &path) else {
                continue;
            };
            self.react_exports.push(ReactExport {
                name,
                is_default,
                props,
            });
            matched = true;
        }
        matched
    }

    /// Classifier 2: `class C extends React.Component<Props>` (or
    /// `PureComponent`, qualified or bare).
    fn try_class_component(&mut self, class: &Class<'_>, is_default: bool) -> bool {
        let Some(super_class) = &class.super_class else {
            return false;
        };
        if !is_component_base(super_class) {
            return false;
        }
        let Some(type_arguments) = &class.super_type_arguments else {
            return false;
        };
        let Some(props_type) = type_arguments.params.first() else {
            return false;
        };
        let name = class.id.as_ref().map(|id| id.name.to_string());
        let path = name.clone().unwrap_or_default();
        let Some(props) = self.compiler.compile_type(props_type, &path) else {
            return false;
        };
        self.react_exports.push(ReactExport {
            name,
            is_default,
            props,
        });
        true
    }

    /// Classifier 3: interfaces compile as object shapes, registered by name.
    fn compile_interface(&mut self, interface: &TSInterfaceDeclaration<'_>) {
        let name = interface.id.name.to_string();
        if let Some(generator) = self.compiler.compile_object(&interface.body.body, &name) {
            self.registry.register(&name, generator.clone());
            self.generators.push(Generator {
                identifier: Some(name),
                get: generator,
            });
        }
    }

    /// Classifiers 4 and 5: union aliases and every other named alias go
    /// through the structural compiler unchanged.
    fn compile_type_alias(&mut self, alias: &TSTypeAliasDeclaration<'_>) {
        let name = alias.id.name.to_string();
        if let Some(generator) = self.compiler.compile_type(&alias.type_annotation, &name) {
            self.registry.register(&name, generator.clone());
            self.generators.push(Generator {
                identifier: Some(name),
                get: generator,
            });
        }
    }

    /// Apply default-export flags to discovered components. Runs after the
    /// walk so declaration order between component and export is irrelevant.
    fn join_default_exports(&mut self) {
        for export in &self.exports {
            if !export.is_default {
                continue;
            }
            for component in &mut self.react_exports {
                if component.name.as_deref() == Some(export.name.as_str()) {
                    component.is_default = true;
                }
            }
        }
        // at most one default component per unit: first wins
        let mut seen = false;
        for component in &mut self.react_exports {
            if component.is_default {
                if seen {
                    component.is_default = false;
                }
                seen = true;
            }
        }
    }
}

fn is_stateless_component_type(name: &str) -> bool {
    let bare = name.strip_prefix("React.").unwrap_or(name);
    matches!(
        bare,
        "SFC" | "FC" | "StatelessComponent" | "FunctionComponent"
    )
}

fn is_component_base(expression: &Expression<'_>) -> bool {
    match expression {
        Expression::Identifier(ident) => {
            matches!(ident.name.as_str(), "Component" | "PureComponent")
        }
        Expression::StaticMemberExpression(member) => {
            matches!(member.property.name.as_str(), "Component" | "PureComponent")
        }
        _ => false,
    }
}

fn module_export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(literal) => literal.value.to_string(),
    }
}

fn declaration_names(declaration: &Declaration<'_>) -> Vec<String> {
    match declaration {
        Declaration::VariableDeclaration(variable) => variable
            .declarations
            .iter()
            .filter_map(|declarator| match &declarator.id {
                BindingPattern::BindingIdentifier(ident) => Some(ident.name.to_string()),
                _ => None,
            })
            .collect(),
        Declaration::ClassDeclaration(class) => {
            class.id.iter().map(|id| id.name.to_string()).collect()
        }
        Declaration::FunctionDeclaration(function) => {
            function.id.iter().map(|id| id.name.to_string()).collect()
        }
        Declaration::TSInterfaceDeclaration(interface) => vec![interface.id.name.to_string()],
        Declaration::TSTypeAliasDeclaration(alias) => vec![alias.id.name.to_string()],
        _ => Vec::new(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// HOST BRIDGE
// ═══════════════════════════════════════════════════════════════════════════════

/// Serializable per-component report: a handful of freshly generated props
/// bags, ready for a host to template into a rendering script.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPropsReport {
    pub name: Option<String>,
    pub is_default: bool,
    pub samples: Vec<serde_json::Value>,
}

/// Sample each discovered component's props generator `samples` times.
pub fn component_props_reports(unit: &CompiledUnit, samples: usize) -> Vec<ComponentPropsReport> {
    unit.react_exports
        .iter()
        .map(|component| ComponentPropsReport {
            name: component.name.clone(),
            is_default: component.is_default,
            samples: (0..samples).map(|_| (component.props)()).collect(),
        })
        .collect()
}

/// Compile a source unit and return the component reports as JSON.
#[cfg(feature = "napi")]
#[napi]
pub fn compile_props_native(file_name: String, source: String) -> napi::Result<String> {
    let unit = compile_source(&file_name, &source).map_err(napi::Error::from_reason)?;
    let reports = component_props_reports(&unit, 4);
    serde_json::to_string(&reports).map_err(|error| napi::Error::from_reason(error.to_string()))
}
