use crate::ast::{Expr, ExprVisitor, Stmt, StmtVisitor};
use crate::token::Token;
use crate::value::Value;

/// Renders a syntax tree as parenthesized prefix text, e.g. `(+ 1 (* 2 3))`.
#[derive(Debug, Default)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        stmt.accept(self)
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = format!("({}", name);
        for expr in exprs {
            out.push(' ');
            out.push_str(&expr.accept(self));
        }
        out.push(')');
        out
    }
}

impl ExprVisitor<String> for AstPrinter {
    fn visit_literal(&mut self, value: &Value) -> String {
        match value {
            Value::String(s) => format!("\"{}\"", s),
            other => other.to_string(),
        }
    }

    fn visit_grouping(&mut self, expression: &Expr) -> String {
        self.parenthesize("group", &[expression])
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> String {
        self.parenthesize(&operator.lexeme, &[right])
    }

    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> String {
        self.parenthesize(&operator.lexeme, &[left, right])
    }

    fn visit_logical(&mut self, left: &Expr, operator: &Token, right: &Expr) -> String {
        self.parenthesize(&operator.lexeme, &[left, right])
    }

    fn visit_ternary(&mut self, condition: &Expr, left: &Expr, right: &Expr) -> String {
        self.parenthesize("?", &[condition, left, right])
    }

    fn visit_variable(&mut self, name: &Token) -> String {
        name.lexeme.clone()
    }

    fn visit_assign(&mut self, name: &Token, value: &Expr) -> String {
        let label = format!("= {}", name.lexeme);
        self.parenthesize(&label, &[value])
    }

    fn visit_call(&mut self, callee: &Expr, _paren: &Token, arguments: &[Expr]) -> String {
        let mut exprs = vec![callee];
        exprs.extend(arguments.iter());
        self.parenthesize("call", &exprs)
    }

    fn visit_get(&mut self, object: &Expr, name: &Token) -> String {
        let label = format!(". {}", name.lexeme);
        self.parenthesize(&label, &[object])
    }

    fn visit_set(&mut self, object: &Expr, name: &Token, value: &Expr) -> String {
        let label = format!("set {}", name.lexeme);
        self.parenthesize(&label, &[object, value])
    }

    fn visit_super(&mut self, _keyword: &Token, method: &Token) -> String {
        format!("(super {})", method.lexeme)
    }

    fn visit_this(&mut self, _keyword: &Token) -> String {
        "this".to_string()
    }
}

impl StmtVisitor<String> for AstPrinter {
    fn visit_expression_stmt(&mut self, expression: &Expr) -> String {
        self.parenthesize(";", &[expression])
    }

    fn visit_print_stmt(&mut self, expression: &Expr) -> String {
        self.parenthesize("print", &[expression])
    }

    fn visit_var_stmt(&mut self, name: &Token, initializer: Option<&Expr>) -> String {
        let label = format!("var {}", name.lexeme);
        match initializer {
            Some(init) => self.parenthesize(&label, &[init]),
            None => format!("({})", label),
        }
    }

    fn visit_block_stmt(&mut self, statements: &[Stmt]) -> String {
        let mut out = String::from("(block");
        for statement in statements {
            out.push(' ');
            out.push_str(&statement.accept(self));
        }
        out.push(')');
        out
    }

    fn visit_if_stmt(
        &mut self,
        condition: &Expr,
        then_branch: &Stmt,
        else_branch: Option<&Stmt>,
    ) -> String {
        let mut out = format!(
            "(if {} {}",
            condition.accept(self),
            then_branch.accept(self)
        );
        if let Some(else_branch) = else_branch {
            out.push(' ');
            out.push_str(&else_branch.accept(self));
        }
        out.push(')');
        out
    }

    fn visit_while_stmt(&mut self, condition: &Expr, body: &Stmt) -> String {
        format!("(while {} {})", condition.accept(self), body.accept(self))
    }

    fn visit_function_stmt(&mut self, name: &Token, params: &[Token], body: &[Stmt]) -> String {
        let params: Vec<&str> = params.iter().map(|p| p.lexeme.as_str()).collect();
        format!(
            "(fun {} ({}) {})",
            name.lexeme,
            params.join(" "),
            self.visit_block_stmt(body)
        )
    }

    fn visit_class_stmt(&mut self, name: &Token, superclass: Option<&Expr>, methods: &[Stmt]) -> String {
        let mut out = format!("(class {}", name.lexeme);
        if let Some(superclass) = superclass {
            out.push_str(" < ");
            out.push_str(&superclass.accept(self));
        }
        for method in methods {
            out.push(' ');
            out.push_str(&method.accept(self));
        }
        out.push(')');
        out
    }

    fn visit_return_stmt(&mut self, _keyword: &Token, value: Option<&Expr>) -> String {
        match value {
            Some(value) => self.parenthesize("return", &[value]),
            None => "(return)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn op(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, None, 1)
    }

    #[test]
    fn test_print_nested_expression() {
        // -123 * (45.67)
        let expr = Expr::binary(
            Expr::unary(op(TokenKind::Minus, "-"), Expr::literal(123.0)),
            op(TokenKind::Star, "*"),
            Expr::grouping(Expr::literal(45.67)),
        );

        assert_eq!(AstPrinter::new().print(&expr), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn test_print_ternary() {
        let expr = Expr::ternary(Expr::literal(true), Expr::literal(1.0), Expr::nil());
        assert_eq!(AstPrinter::new().print(&expr), "(? true 1 nil)");
    }

    #[test]
    fn test_print_statements() {
        let name = Token::new(TokenKind::Identifier, "breakfast", None, 1);
        let stmt = Stmt::Block(vec![
            Stmt::Var {
                name: name.clone(),
                initializer: Some(Expr::literal("toast")),
            },
            Stmt::Print(Expr::Variable(name)),
        ]);

        assert_eq!(
            AstPrinter::new().print_stmt(&stmt),
            "(block (var breakfast \"toast\") (print breakfast))"
        );
    }
}
