//! AST visitor trait for traversing the syntax tree.
//!
//! Default methods walk into every child; override the ones you care about
//! and call the matching `walk_*` function to keep descending.

use crate::node::*;
use crate::pattern::{ArrayBindingItem, BindingPattern, ObjectBindingField};

pub trait AstVisitor<'a> {
    fn visit_stmt(&mut self, stmt: &Stmt<'a>) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr<'a>) {
        walk_expr(self, expr);
    }

    fn visit_decl(&mut self, decl: &Decl<'a>) {
        walk_decl(self, decl);
    }

    fn visit_param(&mut self, param: &ParamVarDecl<'a>) {
        walk_param(self, param);
    }

    fn visit_pattern(&mut self, pattern: &BindingPattern<'a>) {
        walk_pattern(self, pattern);
    }

    fn visit_compound(&mut self, compound: &CompoundStmt<'a>) {
        for stmt in compound.stmts.iter() {
            self.visit_stmt(stmt);
        }
    }
}

pub fn walk_stmt<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, stmt: &Stmt<'a>) {
    match *stmt {
        Stmt::Expr(e) => v.visit_expr(e),
        Stmt::Decl(d) => v.visit_decl(d),
        Stmt::Compound(c) => v.visit_compound(c),
        Stmt::Return(r) => {
            if let Some(value) = r.value {
                v.visit_expr(value);
            }
        }
    }
}

pub fn walk_expr<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, expr: &Expr<'a>) {
    match expr {
        Expr::Number(_)
        | Expr::Char(_)
        | Expr::String(_)
        | Expr::DeclRef(_)
        | Expr::DotIdentifier(_)
        | Expr::CaptureAllByRef(_)
        | Expr::CaptureAllByValue(_) => {}
        Expr::Paren(n) => v.visit_expr(n.inner),
        Expr::Unary(n) => v.visit_expr(n.operand),
        Expr::Binary(n) => {
            v.visit_expr(n.lhs);
            v.visit_expr(n.rhs);
        }
        Expr::Assignment(n) => {
            v.visit_expr(n.lhs);
            v.visit_expr(n.rhs);
        }
        Expr::Cast(n) => {
            v.visit_expr(n.operand);
            v.visit_expr(n.target);
        }
        Expr::Field(n) => v.visit_expr(n.base),
        Expr::Deref(n) => v.visit_expr(n.operand),
        Expr::OptionalUnwrap(n) => v.visit_expr(n.operand),
        Expr::Subscript(n) => {
            v.visit_expr(n.base);
            for index in n.indices.iter() {
                v.visit_expr(index);
            }
        }
        Expr::Call(n) => {
            v.visit_expr(n.callee);
            for arg in n.args.iter() {
                v.visit_expr(arg.value);
            }
        }
        Expr::ArrayLiteral(n) => {
            for element in n.elements.iter() {
                v.visit_expr(element);
            }
        }
        Expr::ArrayType(n) => {
            for size in n.sizes.iter() {
                v.visit_expr(size);
            }
            v.visit_expr(n.element);
        }
        Expr::OptionalType(n) => v.visit_expr(n.inner),
        Expr::FunctionType(n) => {
            for param in n.params.iter() {
                v.visit_param(param);
            }
            v.visit_expr(n.return_type);
        }
        Expr::If(n) => {
            v.visit_expr(n.condition);
            v.visit_stmt(&n.then_branch);
            if let Some(else_branch) = &n.else_branch {
                v.visit_stmt(else_branch);
            }
        }
        Expr::Decl(d) => v.visit_decl(d),
    }
}

pub fn walk_decl<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, decl: &Decl<'a>) {
    match decl {
        Decl::Param(p) => v.visit_param(p),
        Decl::Field(f) => {
            if let Some(ty) = f.type_annotation {
                v.visit_expr(ty);
            }
            if let Some(default) = f.default_value {
                v.visit_expr(default);
            }
        }
        Decl::ArrowFunction(f) => {
            for param in f.params.iter() {
                v.visit_param(param);
            }
            if let Some(ty) = f.return_type {
                v.visit_expr(ty);
            }
            v.visit_compound(f.body);
        }
        Decl::Closure(c) => {
            for capture in c.captures.iter() {
                v.visit_expr(capture);
            }
            for param in c.params.iter() {
                v.visit_param(param);
            }
            if let Some(ty) = c.return_type {
                v.visit_expr(ty);
            }
            v.visit_compound(c.body);
        }
        Decl::ArrayDestructure(d) => {
            walk_array_items(v, d.items);
            if let Some(init) = d.init {
                v.visit_expr(init);
            }
        }
        Decl::ObjectDestructure(d) => {
            walk_object_fields(v, d.fields);
            if let Some(init) = d.init {
                v.visit_expr(init);
            }
        }
        Decl::Record(r) => {
            for field in r.fields.iter() {
                if let Some(ty) = field.type_annotation {
                    v.visit_expr(ty);
                }
                if let Some(default) = field.default_value {
                    v.visit_expr(default);
                }
            }
        }
        Decl::Var(var) => {
            if let Some(ty) = var.type_annotation {
                v.visit_expr(ty);
            }
            if let Some(init) = var.init {
                v.visit_expr(init);
            }
        }
        Decl::Function(f) => {
            for param in f.params.iter() {
                v.visit_param(param);
            }
            if let Some(ty) = f.return_type {
                v.visit_expr(ty);
            }
            if let Some(body) = f.body() {
                v.visit_compound(body);
            }
        }
    }
}

pub fn walk_param<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, param: &ParamVarDecl<'a>) {
    match param.binding {
        ParamBinding::Name(_) => {}
        ParamBinding::Array(items) => walk_array_items(v, items),
        ParamBinding::Object(fields) => walk_object_fields(v, fields),
    }
    if let Some(ty) = param.type_annotation {
        v.visit_expr(ty);
    }
    if let Some(default) = param.default_value {
        v.visit_expr(default);
    }
}

pub fn walk_pattern<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, pattern: &BindingPattern<'a>) {
    match pattern {
        BindingPattern::Identifier(_) | BindingPattern::Spread(_) => {}
        BindingPattern::Array(items) => walk_array_items(v, items),
        BindingPattern::Object(fields) => walk_object_fields(v, fields),
    }
}

fn walk_array_items<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, items: &[ArrayBindingItem<'a>]) {
    for item in items {
        if let Some(index) = item.index {
            v.visit_expr(index);
        }
        v.visit_pattern(&item.pattern);
    }
}

fn walk_object_fields<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, fields: &[ObjectBindingField<'a>]) {
    for field in fields {
        v.visit_pattern(&field.pattern);
    }
}
