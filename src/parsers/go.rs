//! Go parser using tree-sitter
//!
//! Lowers the tree-sitter concrete syntax tree into [`crate::ast::File`]:
//! top-level declarations, the expression shapes rules match on, and every
//! comment token grouped the way Go groups doc comments.

use crate::ast::{
    Comment, CommentGroup, Decl, DeclToken, Expr, File, FileModel, FuncDecl, GenDecl, Ident, Spec,
    ValueSpec,
};
use crate::error::{Error, Result};
use crate::models::Position;
use std::path::Path;
use tracing::debug;
use tree_sitter::{Node, Parser};

/// Parse a Go file from disk
pub fn parse(path: &Path) -> Result<FileModel> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_source(&source, &path.display().to_string())
}

/// Parse Go source code directly; `name` becomes the filename of every position
pub fn parse_source(source: &str, name: &str) -> Result<FileModel> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;

    let tree = parser.parse(source, None).ok_or_else(|| Error::Parse {
        filename: name.to_string(),
        line: 1,
        column: 1,
    })?;

    let root = tree.root_node();
    if root.has_error() {
        let at = first_error(root).unwrap_or(root).start_position();
        return Err(Error::Parse {
            filename: name.to_string(),
            line: at.row as u32 + 1,
            column: at.column as u32 + 1,
        });
    }

    let lowering = Lowering {
        source: source.as_bytes(),
        filename: name,
    };
    let ast = lowering.file(root);
    debug!(
        "Parsed {}: {} decls, {} comment groups",
        name,
        ast.decls.len(),
        ast.comments.len()
    );

    Ok(FileModel::new(name, source, ast))
}

/// Leftmost error or missing node, depth first
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}

struct Lowering<'a> {
    source: &'a [u8],
    filename: &'a str,
}

impl<'a> Lowering<'a> {
    fn pos(&self, node: Node) -> Position {
        let p = node.start_position();
        Position::new(
            self.filename,
            node.start_byte(),
            p.row as u32 + 1,
            p.column as u32 + 1,
        )
    }

    fn end_pos(&self, node: Node) -> Position {
        let p = node.end_position();
        Position::new(
            self.filename,
            node.end_byte(),
            p.row as u32 + 1,
            p.column as u32 + 1,
        )
    }

    fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source).unwrap_or("")
    }

    fn ident(&self, node: Node) -> Ident {
        Ident::new(self.text(node), self.pos(node))
    }

    fn file(&self, root: Node) -> File {
        let mut file = File::default();
        let mut cursor = root.walk();

        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_clause" => {
                    let mut inner = child.walk();
                    file.package = child
                        .named_children(&mut inner)
                        .find(|n| n.kind() == "package_identifier")
                        .map(|n| self.ident(n));
                }
                "var_declaration" => file.decls.push(self.gen_decl(child, DeclToken::Var)),
                "const_declaration" => file.decls.push(self.gen_decl(child, DeclToken::Const)),
                "type_declaration" => file.decls.push(self.gen_decl(child, DeclToken::Type)),
                "import_declaration" => file.decls.push(self.gen_decl(child, DeclToken::Import)),
                "function_declaration" | "method_declaration" => {
                    if let Some(func) = self.func_decl(child) {
                        file.decls.push(Decl::Func(func));
                    }
                }
                _ => {}
            }
        }

        file.comments = self.comment_groups(root);
        file
    }

    fn gen_decl(&self, node: Node, token: DeclToken) -> Decl {
        let spec_kinds: &[&str] = match token {
            DeclToken::Var => &["var_spec"],
            DeclToken::Const => &["const_spec"],
            DeclToken::Type => &["type_spec", "type_alias"],
            DeclToken::Import => &["import_spec"],
        };

        let specs = spec_nodes(node, spec_kinds)
            .into_iter()
            .filter_map(|spec| match token {
                DeclToken::Var | DeclToken::Const => Some(Spec::Value(self.value_spec(spec))),
                DeclToken::Type => spec.child_by_field_name("name").map(|name| Spec::Type {
                    name: self.ident(name),
                }),
                DeclToken::Import => self.import_spec(spec),
            })
            .collect();

        Decl::Gen(GenDecl {
            token,
            pos: self.pos(node),
            specs,
        })
    }

    fn value_spec(&self, node: Node) -> ValueSpec {
        let mut cursor = node.walk();
        let names = node
            .children_by_field_name("name", &mut cursor)
            .filter(|n| n.kind() == "identifier")
            .map(|n| self.ident(n))
            .collect();

        let type_name = node
            .child_by_field_name("type")
            .map(|n| self.text(n).to_string());

        let values = match node.child_by_field_name("value") {
            Some(list) if list.kind() == "expression_list" => self.expressions(list),
            Some(single) => vec![self.expr(single)],
            None => Vec::new(),
        };

        ValueSpec {
            names,
            type_name,
            values,
        }
    }

    fn import_spec(&self, node: Node) -> Option<Spec> {
        let path = node.child_by_field_name("path")?;
        Some(Spec::Import {
            name: node
                .child_by_field_name("name")
                .map(|n| self.text(n).to_string()),
            path: self.text(path).trim_matches(|c| c == '"' || c == '`').to_string(),
            pos: self.pos(node),
        })
    }

    fn func_decl(&self, node: Node) -> Option<FuncDecl> {
        let name = node.child_by_field_name("name")?;
        Some(FuncDecl {
            name: self.ident(name),
            receiver: node
                .child_by_field_name("receiver")
                .map(|r| self.text(r).to_string()),
        })
    }

    /// Named, non-comment children as expressions
    fn expressions(&self, node: Node) -> Vec<Expr> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .map(|n| self.expr(n))
            .collect()
    }

    fn expr(&self, node: Node) -> Expr {
        match node.kind() {
            "identifier" => Expr::Ident(self.ident(node)),
            "selector_expression" => {
                match (
                    node.child_by_field_name("operand"),
                    node.child_by_field_name("field"),
                ) {
                    (Some(operand), Some(field)) => Expr::Selector {
                        operand: Box::new(self.expr(operand)),
                        field: self.ident(field),
                    },
                    _ => self.other(node),
                }
            }
            "call_expression" => match node.child_by_field_name("function") {
                Some(function) => Expr::Call {
                    function: Box::new(self.expr(function)),
                    args: node
                        .child_by_field_name("arguments")
                        .map(|args| self.expressions(args))
                        .unwrap_or_default(),
                    pos: self.pos(node),
                },
                None => self.other(node),
            },
            "interpreted_string_literal" | "raw_string_literal" | "int_literal"
            | "float_literal" | "imaginary_literal" | "rune_literal" => Expr::BasicLit {
                value: self.text(node).to_string(),
                pos: self.pos(node),
            },
            _ => self.other(node),
        }
    }

    fn other(&self, node: Node) -> Expr {
        Expr::Other {
            kind: node.kind().to_string(),
            pos: self.pos(node),
        }
    }

    /// Every comment token in source order
    fn comments(&self, root: Node) -> Vec<(Comment, usize, usize)> {
        let mut out = Vec::new();
        let mut cursor = root.walk();

        loop {
            let node = cursor.node();
            if node.kind() == "comment" {
                let comment = Comment {
                    text: self.text(node).to_string(),
                    pos: self.pos(node),
                    end: self.end_pos(node),
                };
                out.push((comment, node.start_byte(), node.end_byte()));
            } else if cursor.goto_first_child() {
                continue;
            }

            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    return out;
                }
            }
        }
    }

    /// A comment joins the previous group when only whitespace separates them
    /// and it starts at most one line after the previous comment ends
    fn comment_groups(&self, root: Node) -> Vec<CommentGroup> {
        let mut groups: Vec<CommentGroup> = Vec::new();
        let mut prev: Option<(u32, usize)> = None;

        for (comment, start, end) in self.comments(root) {
            let joins = prev.is_some_and(|(prev_line, prev_end)| {
                comment.pos.line <= prev_line + 1
                    && self
                        .source
                        .get(prev_end..start)
                        .is_some_and(|gap| gap.iter().all(u8::is_ascii_whitespace))
            });
            prev = Some((comment.end.line, end));

            match groups.last_mut() {
                Some(group) if joins => group.list.push(comment),
                _ => groups.push(CommentGroup {
                    list: vec![comment],
                }),
            }
        }

        groups
    }
}

/// Spec nodes of the wanted kinds, looking through `*_spec_list` wrappers
fn spec_nodes<'t>(node: Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if kinds.contains(&child.kind()) {
            out.push(child);
        } else if child.kind().ends_with("_spec_list") {
            out.extend(spec_nodes(child, kinds));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> FileModel {
        parse_source(source, "test.go").expect("should parse Go source")
    }

    fn value_specs(file: &FileModel, token: DeclToken) -> Vec<&ValueSpec> {
        file.gen_decls(token)
            .flat_map(|d| d.specs.iter())
            .filter_map(|s| match s {
                Spec::Value(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_package_and_functions() {
        let file = parse_ok(
            r#"
package widgets

func New() {}

func (w *Widget) Close() error { return nil }
"#,
        );
        assert_eq!(file.ast().package.as_ref().map(|p| p.name.as_str()), Some("widgets"));

        let funcs: Vec<&FuncDecl> = file
            .ast()
            .decls
            .iter()
            .filter_map(|d| match d {
                Decl::Func(f) => Some(f),
                _ => None,
            })
            .collect();
        assert_eq!(funcs.len(), 2);
        assert_eq!(funcs[0].name.name, "New");
        assert!(funcs[0].receiver.is_none());
        assert_eq!(funcs[1].name.name, "Close");
        assert_eq!(funcs[1].receiver.as_deref(), Some("(w *Widget)"));
    }

    #[test]
    fn test_var_call_shape() {
        let file = parse_ok("package p\n\nvar ErrX = errors.New(\"x\")\n");
        let specs = value_specs(&file, DeclToken::Var);
        assert_eq!(specs.len(), 1);
        let spec = specs[0];
        assert_eq!(spec.names.len(), 1);
        assert_eq!(spec.names[0].name, "ErrX");
        assert_eq!(spec.names[0].pos.line, 3);
        assert_eq!(spec.names[0].pos.column, 5);
        assert_eq!(spec.names[0].pos.offset, 15);

        match &spec.values[..] {
            [Expr::Call { function, args, .. }] => {
                assert!(crate::ast::is_pkg_dot_name(function, "errors", "New"));
                assert!(matches!(&args[..], [Expr::BasicLit { value, .. }] if value == "\"x\""));
            }
            other => panic!("expected one call, got {:?}", other),
        }
    }

    #[test]
    fn test_grouped_and_multi_specs() {
        let file = parse_ok(
            r#"
package p

var (
    a, b = 1, 2
    c int
)

const (
    X = iota
    Y
)
"#,
        );
        let vars = value_specs(&file, DeclToken::Var);
        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0].names.len(), 2);
        assert_eq!(vars[0].values.len(), 2);
        assert_eq!(vars[1].type_name.as_deref(), Some("int"));
        assert!(vars[1].values.is_empty());

        let consts = value_specs(&file, DeclToken::Const);
        assert_eq!(consts.len(), 2);
        assert!(consts[1].values.is_empty());
    }

    #[test]
    fn test_imports_and_types() {
        let file = parse_ok(
            r#"
package p

import (
    "errors"
    f "fmt"
)

type Kind int
"#,
        );
        let imports: Vec<(Option<String>, String)> = file
            .gen_decls(DeclToken::Import)
            .flat_map(|d| d.specs.iter())
            .filter_map(|s| match s {
                Spec::Import { name, path, .. } => Some((name.clone(), path.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(
            imports,
            vec![
                (None, "errors".to_string()),
                (Some("f".to_string()), "fmt".to_string())
            ]
        );

        let types = file.gen_decls(DeclToken::Type).next().expect("type decl");
        assert!(matches!(&types.specs[..], [Spec::Type { name }] if name.name == "Kind"));
    }

    #[test]
    fn test_comment_grouping() {
        let file = parse_ok(
            r#"// Package p doc,
// second line.
package p

/* block */ // same line

// separate group
func F() {
    x := 1 // trailing
    // next line after code
    _ = x
}
"#,
        );
        let groups: Vec<Vec<&str>> = file
            .comments()
            .iter()
            .map(|g| g.list.iter().map(|c| c.text.as_str()).collect())
            .collect();
        assert_eq!(
            groups,
            vec![
                vec!["// Package p doc,", "// second line."],
                vec!["/* block */", "// same line"],
                vec!["// separate group"],
                vec!["// trailing", "// next line after code"],
            ]
        );
    }

    #[test]
    fn test_comment_positions() {
        let file = parse_ok("package p\n\n/* a\n   b */\nvar x = 1\n");
        let comment = &file.comments()[0].list[0];
        assert_eq!(comment.pos.line, 3);
        assert_eq!(comment.pos.column, 1);
        assert_eq!(comment.end.line, 4);
        assert_eq!(comment.text, "/* a\n   b */");
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let err = parse_source("package p\n\nvar = \n", "broken.go").unwrap_err();
        match err {
            Error::Parse { filename, line, .. } => {
                assert_eq!(filename, "broken.go");
                assert!(line >= 3, "error should be reported on the var line, got {line}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse(Path::new("/definitely/not/here.go")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
