//! AST visitor that collects JSX tag and call-expression usage sites.

use oxc_ast::ast::{
    CallExpression, Expression, JSXElementName, JSXMemberExpressionObject, JSXOpeningElement,
};
use oxc_ast_visit::{walk, Visit};
use rustc_hash::FxHashSet;

/// Records every identifier used as a JSX tag head or as the root of a call
/// expression. Imported names are later checked against these sets, so an
/// import with no matching usage site never counts as a reference.
#[derive(Debug, Default)]
pub(super) struct UsageVisitor {
    /// Names appearing as JSX opening/self-closing tags, including the head
    /// of dotted tags (`<Foo.Bar/>` records `Foo`).
    pub(super) jsx_tags: FxHashSet<String>,
    /// Names appearing as call targets, directly or as the root of a
    /// property-access chain (`fn(...)`, `fn.bind(...)`, `await fn(...)`).
    pub(super) call_targets: FxHashSet<String>,
}

impl<'a> Visit<'a> for UsageVisitor {
    fn visit_jsx_opening_element(&mut self, elem: &JSXOpeningElement<'a>) {
        if let Some(name) = jsx_root_name(&elem.name) {
            self.jsx_tags.insert(name.to_string());
        }
        walk::walk_jsx_opening_element(self, elem);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if let Some(name) = callee_root_name(&call.callee) {
            self.call_targets.insert(name.to_string());
        }
        walk::walk_call_expression(self, call);
    }
}

fn jsx_root_name<'a>(name: &'a JSXElementName<'a>) -> Option<&'a str> {
    match name {
        JSXElementName::Identifier(ident) => Some(ident.name.as_str()),
        JSXElementName::IdentifierReference(ident) => Some(ident.name.as_str()),
        JSXElementName::MemberExpression(member) => jsx_member_root(&member.object),
        JSXElementName::NamespacedName(namespaced) => Some(namespaced.namespace.name.as_str()),
        JSXElementName::ThisExpression(_) => None,
    }
}

fn jsx_member_root<'a>(object: &'a JSXMemberExpressionObject<'a>) -> Option<&'a str> {
    match object {
        JSXMemberExpressionObject::IdentifierReference(ident) => Some(ident.name.as_str()),
        JSXMemberExpressionObject::MemberExpression(member) => jsx_member_root(&member.object),
        JSXMemberExpressionObject::ThisExpression(_) => None,
    }
}

fn callee_root_name<'a>(callee: &'a Expression<'a>) -> Option<&'a str> {
    match callee {
        Expression::Identifier(ident) => Some(ident.name.as_str()),
        Expression::StaticMemberExpression(member) => callee_root_name(&member.object),
        Expression::ParenthesizedExpression(paren) => callee_root_name(&paren.expression),
        _ => None,
    }
}
