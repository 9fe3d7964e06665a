//! Syntax tree produced by the parser.
//!
//! Consumers walk the tree through [`ExprVisitor`] and [`StmtVisitor`]: each
//! node's `accept` calls the visitor method for its own variant, so printing
//! and evaluation live beside the tree instead of inside it.
//!
//! `Call`, `Get`, `Set`, `Super`, `This`, `Function`, `Class` and `Return`
//! are reserved shapes. The parser does not build them yet.

use crate::token::Token;
use crate::value::Value;

#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Value),
    Grouping(Box<Expr>),
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Ternary {
        condition: Box<Expr>,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Variable(Token),
    Assign {
        name: Token,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        paren: Token,
        arguments: Vec<Expr>,
    },
    Get {
        object: Box<Expr>,
        name: Token,
    },
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },
    Super {
        keyword: Token,
        method: Token,
    },
    This(Token),
}

impl Expr {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn nil() -> Self {
        Expr::Literal(Value::Nil)
    }

    pub fn grouping(expression: Expr) -> Self {
        Expr::Grouping(Box::new(expression))
    }

    pub fn unary(operator: Token, right: Expr) -> Self {
        Expr::Unary {
            operator,
            right: Box::new(right),
        }
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn logical(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Logical {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn ternary(condition: Expr, left: Expr, right: Expr) -> Self {
        Expr::Ternary {
            condition: Box::new(condition),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn assign(name: Token, value: Expr) -> Self {
        Expr::Assign {
            name,
            value: Box::new(value),
        }
    }

    pub fn accept<R, V: ExprVisitor<R> + ?Sized>(&self, visitor: &mut V) -> R {
        match self {
            Expr::Literal(value) => visitor.visit_literal(value),
            Expr::Grouping(expression) => visitor.visit_grouping(expression),
            Expr::Unary { operator, right } => visitor.visit_unary(operator, right),
            Expr::Binary {
                left,
                operator,
                right,
            } => visitor.visit_binary(left, operator, right),
            Expr::Logical {
                left,
                operator,
                right,
            } => visitor.visit_logical(left, operator, right),
            Expr::Ternary {
                condition,
                left,
                right,
            } => visitor.visit_ternary(condition, left, right),
            Expr::Variable(name) => visitor.visit_variable(name),
            Expr::Assign { name, value } => visitor.visit_assign(name, value),
            Expr::Call {
                callee,
                paren,
                arguments,
            } => visitor.visit_call(callee, paren, arguments),
            Expr::Get { object, name } => visitor.visit_get(object, name),
            Expr::Set {
                object,
                name,
                value,
            } => visitor.visit_set(object, name, value),
            Expr::Super { keyword, method } => visitor.visit_super(keyword, method),
            Expr::This(keyword) => visitor.visit_this(keyword),
        }
    }
}

/// Structural equality. Variables (and assignment targets) match on their
/// name only, so trees built from different source lines still compare equal.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        use Expr::*;

        fn same(a: &Token, b: &Token) -> bool {
            a.kind == b.kind && a.lexeme == b.lexeme
        }

        match (self, other) {
            (Literal(a), Literal(b)) => a == b,
            (Grouping(a), Grouping(b)) => a == b,
            (
                Unary {
                    operator: op_a,
                    right: a,
                },
                Unary {
                    operator: op_b,
                    right: b,
                },
            ) => same(op_a, op_b) && a == b,
            (
                Binary {
                    left: la,
                    operator: op_a,
                    right: ra,
                },
                Binary {
                    left: lb,
                    operator: op_b,
                    right: rb,
                },
            )
            | (
                Logical {
                    left: la,
                    operator: op_a,
                    right: ra,
                },
                Logical {
                    left: lb,
                    operator: op_b,
                    right: rb,
                },
            ) => same(op_a, op_b) && la == lb && ra == rb,
            (
                Ternary {
                    condition: ca,
                    left: la,
                    right: ra,
                },
                Ternary {
                    condition: cb,
                    left: lb,
                    right: rb,
                },
            ) => ca == cb && la == lb && ra == rb,
            (Variable(a), Variable(b)) => a.lexeme == b.lexeme,
            (Assign { name: na, value: a }, Assign { name: nb, value: b }) => {
                na.lexeme == nb.lexeme && a == b
            }
            (
                Call {
                    callee: ca,
                    arguments: aa,
                    ..
                },
                Call {
                    callee: cb,
                    arguments: ab,
                    ..
                },
            ) => ca == cb && aa == ab,
            (Get { object: a, name: na }, Get { object: b, name: nb }) => {
                same(na, nb) && a == b
            }
            (
                Set {
                    object: oa,
                    name: na,
                    value: va,
                },
                Set {
                    object: ob,
                    name: nb,
                    value: vb,
                },
            ) => same(na, nb) && oa == ob && va == vb,
            (Super { method: a, .. }, Super { method: b, .. }) => same(a, b),
            (This(_), This(_)) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    Print(Expr),
    Var {
        name: Token,
        initializer: Option<Expr>,
    },
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    Function {
        name: Token,
        params: Vec<Token>,
        body: Vec<Stmt>,
    },
    Class {
        name: Token,
        superclass: Option<Expr>,
        methods: Vec<Stmt>,
    },
    Return {
        keyword: Token,
        value: Option<Expr>,
    },
}

impl Stmt {
    pub fn accept<R, V: StmtVisitor<R> + ?Sized>(&self, visitor: &mut V) -> R {
        match self {
            Stmt::Expression(expression) => visitor.visit_expression_stmt(expression),
            Stmt::Print(expression) => visitor.visit_print_stmt(expression),
            Stmt::Var { name, initializer } => visitor.visit_var_stmt(name, initializer.as_ref()),
            Stmt::Block(statements) => visitor.visit_block_stmt(statements),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => visitor.visit_if_stmt(condition, then_branch, else_branch.as_deref()),
            Stmt::While { condition, body } => visitor.visit_while_stmt(condition, body),
            Stmt::Function { name, params, body } => {
                visitor.visit_function_stmt(name, params, body)
            }
            Stmt::Class {
                name,
                superclass,
                methods,
            } => visitor.visit_class_stmt(name, superclass.as_ref(), methods),
            Stmt::Return { keyword, value } => visitor.visit_return_stmt(keyword, value.as_ref()),
        }
    }
}

pub trait ExprVisitor<R> {
    fn visit_literal(&mut self, value: &Value) -> R;
    fn visit_grouping(&mut self, expression: &Expr) -> R;
    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> R;
    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> R;
    fn visit_logical(&mut self, left: &Expr, operator: &Token, right: &Expr) -> R;
    fn visit_ternary(&mut self, condition: &Expr, left: &Expr, right: &Expr) -> R;
    fn visit_variable(&mut self, name: &Token) -> R;
    fn visit_assign(&mut self, name: &Token, value: &Expr) -> R;
    fn visit_call(&mut self, callee: &Expr, paren: &Token, arguments: &[Expr]) -> R;
    fn visit_get(&mut self, object: &Expr, name: &Token) -> R;
    fn visit_set(&mut self, object: &Expr, name: &Token, value: &Expr) -> R;
    fn visit_super(&mut self, keyword: &Token, method: &Token) -> R;
    fn visit_this(&mut self, keyword: &Token) -> R;
}

pub trait StmtVisitor<R> {
    fn visit_expression_stmt(&mut self, expression: &Expr) -> R;
    fn visit_print_stmt(&mut self, expression: &Expr) -> R;
    fn visit_var_stmt(&mut self, name: &Token, initializer: Option<&Expr>) -> R;
    fn visit_block_stmt(&mut self, statements: &[Stmt]) -> R;
    fn visit_if_stmt(&mut self, condition: &Expr, then_branch: &Stmt, else_branch: Option<&Stmt>)
    -> R;
    fn visit_while_stmt(&mut self, condition: &Expr, body: &Stmt) -> R;
    fn visit_function_stmt(&mut self, name: &Token, params: &[Token], body: &[Stmt]) -> R;
    fn visit_class_stmt(&mut self, name: &Token, superclass: Option<&Expr>, methods: &[Stmt]) -> R;
    fn visit_return_stmt(&mut self, keyword: &Token, value: Option<&Expr>) -> R;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn ident(name: &str, line: usize) -> Token {
        Token::new(TokenKind::Identifier, name, None, line)
    }

    #[test]
    fn test_literal_equality_by_value() {
        assert_eq!(Expr::literal(1.0), Expr::literal(1.0));
        assert_ne!(Expr::literal(1.0), Expr::literal("1"));
        assert_eq!(Expr::nil(), Expr::Literal(Value::Nil));
    }

    #[test]
    fn test_variable_equality_by_name() {
        assert_eq!(Expr::Variable(ident("a", 1)), Expr::Variable(ident("a", 9)));
        assert_ne!(Expr::Variable(ident("a", 1)), Expr::Variable(ident("b", 1)));
    }

    struct Counter(usize);

    impl StmtVisitor<()> for Counter {
        fn visit_expression_stmt(&mut self, _: &Expr) {
            self.0 += 1;
        }
        fn visit_print_stmt(&mut self, _: &Expr) {
            self.0 += 10;
        }
        fn visit_var_stmt(&mut self, _: &Token, _: Option<&Expr>) {}
        fn visit_block_stmt(&mut self, statements: &[Stmt]) {
            for statement in statements {
                statement.accept(self);
            }
        }
        fn visit_if_stmt(&mut self, _: &Expr, _: &Stmt, _: Option<&Stmt>) {}
        fn visit_while_stmt(&mut self, _: &Expr, _: &Stmt) {}
        fn visit_function_stmt(&mut self, _: &Token, _: &[Token], _: &[Stmt]) {}
        fn visit_class_stmt(&mut self, _: &Token, _: Option<&Expr>, _: &[Stmt]) {}
        fn visit_return_stmt(&mut self, _: &Token, _: Option<&Expr>) {}
    }

    #[test]
    fn test_accept_dispatches_by_variant() {
        let block = Stmt::Block(vec![
            Stmt::Expression(Expr::nil()),
            Stmt::Print(Expr::nil()),
            Stmt::Block(vec![Stmt::Print(Expr::nil())]),
        ]);

        let mut counter = Counter(0);
        block.accept(&mut counter);

        assert_eq!(counter.0, 21);
    }
}
