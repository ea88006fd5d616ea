use super::Expr;

/// Whether `expr` spells `pkg.name`, with `pkg` a bare identifier.
///
/// No import resolution happens here: a local variable shadowing `pkg`
/// still matches.
pub fn is_pkg_dot_name(expr: &Expr, pkg: &str, name: &str) -> bool {
    match expr {
        Expr::Selector { operand, field } => {
            field.name == name && matches!(operand.as_ref(), Expr::Ident(id) if id.name == pkg)
        }
        Expr::Ident(_) | Expr::Call { .. } | Expr::BasicLit { .. } | Expr::Other { .. } => false,
    }
}
