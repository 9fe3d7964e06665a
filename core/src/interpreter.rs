use std::io::{self, Stdout, Write};

use crate::RunOutcome;
use crate::ast::{Expr, ExprVisitor, Stmt, StmtVisitor};
use crate::diagnostics::Reporter;
use crate::environment::Environment;
use crate::error::{ExecError, Result, RuntimeError};
use crate::token::{Token, TokenKind};
use crate::value::Value;

type ExecResult = std::result::Result<(), ExecError>;

/// Tree-walking evaluator. `Print` output goes to `out`.
pub struct Interpreter<W: Write = Stdout> {
    environment: Environment,
    out: W,
}

impl Interpreter<Stdout> {
    pub fn new() -> Self {
        Self::with_environment(Environment::new())
    }

    pub fn with_environment(environment: Environment) -> Self {
        Self {
            environment,
            out: io::stdout(),
        }
    }
}

impl Default for Interpreter<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    pub fn with_output(out: W) -> Self {
        Self {
            environment: Environment::new(),
            out,
        }
    }

    pub fn with_environment_and_output(environment: Environment, out: W) -> Self {
        Self { environment, out }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_parts(self) -> (Environment, W) {
        (self.environment, self.out)
    }

    /// Execute a batch of statements.
    ///
    /// The first runtime error stops the batch and is reported once; bindings
    /// made before it stay in place. Only a failure to write output is
    /// returned as an error.
    pub fn interpret(
        &mut self,
        statements: &[Stmt],
        reporter: &mut dyn Reporter,
    ) -> io::Result<RunOutcome> {
        let span = tracing::debug_span!("interpret", statements = statements.len());
        let _enter = span.enter();

        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                Err(ExecError::Runtime(error)) => {
                    tracing::debug!(line = error.token.line, "batch aborted by runtime error");
                    reporter.runtime_error(&error);
                    self.out.flush()?;
                    return Ok(RunOutcome::RuntimeError);
                }
                Err(ExecError::Output(error)) => return Err(error),
            }
        }

        self.out.flush()?;
        Ok(RunOutcome::Ok)
    }

    pub fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        stmt.accept(self)
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        expr.accept(self)
    }

    /// Run `statements` in a fresh child scope. The scope is discarded on
    /// every exit path.
    pub fn execute_block(&mut self, statements: &[Stmt]) -> ExecResult {
        let span = tracing::trace_span!("block", depth = self.environment.depth());
        let _enter = span.enter();

        self.environment.enter_scope();
        let result = statements.iter().try_for_each(|stmt| self.execute(stmt));
        self.environment.exit_scope();
        result
    }

    fn add(&self, operator: &Token, left: Value, right: Value) -> Result<Value> {
        match (&left, &right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(_), _) | (_, Value::String(_)) => {
                Ok(Value::String(format!("{}{}", left, right)))
            }
            _ => Err(RuntimeError::new(
                operator,
                format!("Could not add {} to {}.", left, right),
            )),
        }
    }
}

fn number_operand(operator: &Token, operand: &Value) -> Result<f64> {
    match operand {
        Value::Number(n) => Ok(*n),
        _ => Err(RuntimeError::new(operator, "Operand must be a number.")),
    }
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64)> {
    Ok((
        number_operand(operator, left)?,
        number_operand(operator, right)?,
    ))
}

fn unsupported(token: &Token, what: &str) -> RuntimeError {
    RuntimeError::new(token, format!("{} is not supported.", what))
}

impl<W: Write> ExprVisitor<Result<Value>> for Interpreter<W> {
    fn visit_literal(&mut self, value: &Value) -> Result<Value> {
        Ok(value.clone())
    }

    fn visit_grouping(&mut self, expression: &Expr) -> Result<Value> {
        self.evaluate(expression)
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expr) -> Result<Value> {
        let right = self.evaluate(right)?;

        match operator.kind {
            TokenKind::Minus => Ok(Value::Number(-number_operand(operator, &right)?)),
            TokenKind::Bang => Ok(Value::Boolean(!right.is_truthy())),
            _ => Err(RuntimeError::new(operator, "Unknown unary operator.")),
        }
    }

    fn visit_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match operator.kind {
            TokenKind::Minus => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Number(a - b))
            }
            TokenKind::Slash => {
                let (a, b) = number_operands(operator, &left, &right)?;
                if b == 0.0 {
                    return Err(RuntimeError::new(operator, "Cannot divide by 0"));
                }
                Ok(Value::Number(a / b))
            }
            TokenKind::Star => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Number(a * b))
            }
            TokenKind::Plus => self.add(operator, left, right),
            TokenKind::Greater => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Boolean(a > b))
            }
            TokenKind::GreaterEqual => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Boolean(a >= b))
            }
            TokenKind::Less => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Boolean(a < b))
            }
            TokenKind::LessEqual => {
                let (a, b) = number_operands(operator, &left, &right)?;
                Ok(Value::Boolean(a <= b))
            }
            TokenKind::BangEqual => Ok(Value::Boolean(!left.is_equal(&right))),
            TokenKind::EqualEqual => Ok(Value::Boolean(left.is_equal(&right))),
            _ => Err(RuntimeError::new(operator, "Unknown binary operator.")),
        }
    }

    fn visit_logical(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value> {
        let left = self.evaluate(left)?;

        let short_circuits = match operator.kind {
            TokenKind::Or => left.is_truthy(),
            _ => !left.is_truthy(),
        };
        if short_circuits {
            return Ok(left);
        }

        self.evaluate(right)
    }

    fn visit_ternary(&mut self, condition: &Expr, left: &Expr, right: &Expr) -> Result<Value> {
        if self.evaluate(condition)?.is_truthy() {
            self.evaluate(left)
        } else {
            self.evaluate(right)
        }
    }

    fn visit_variable(&mut self, name: &Token) -> Result<Value> {
        self.environment.get(name)
    }

    fn visit_assign(&mut self, name: &Token, value: &Expr) -> Result<Value> {
        let value = self.evaluate(value)?;
        self.environment.assign(name, value.clone())?;
        Ok(value)
    }

    fn visit_call(&mut self, _callee: &Expr, paren: &Token, _arguments: &[Expr]) -> Result<Value> {
        Err(unsupported(paren, "Calling a value"))
    }

    fn visit_get(&mut self, _object: &Expr, name: &Token) -> Result<Value> {
        Err(unsupported(name, "Property access"))
    }

    fn visit_set(&mut self, _object: &Expr, name: &Token, _value: &Expr) -> Result<Value> {
        Err(unsupported(name, "Property assignment"))
    }

    fn visit_super(&mut self, keyword: &Token, _method: &Token) -> Result<Value> {
        Err(unsupported(keyword, "'super'"))
    }

    fn visit_this(&mut self, keyword: &Token) -> Result<Value> {
        Err(unsupported(keyword, "'this'"))
    }
}

impl<W: Write> StmtVisitor<ExecResult> for Interpreter<W> {
    fn visit_expression_stmt(&mut self, expression: &Expr) -> ExecResult {
        self.evaluate(expression)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, expression: &Expr) -> ExecResult {
        let value = self.evaluate(expression)?;
        writeln!(self.out, "{}", value)?;
        Ok(())
    }

    fn visit_var_stmt(&mut self, name: &Token, initializer: Option<&Expr>) -> ExecResult {
        let value = match initializer {
            Some(expr) => self.evaluate(expr)?,
            None => Value::Nil,
        };
        self.environment.define(&name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, statements: &[Stmt]) -> ExecResult {
        self.execute_block(statements)
    }

    fn visit_if_stmt(
        &mut self,
        condition: &Expr,
        then_branch: &Stmt,
        else_branch: Option<&Stmt>,
    ) -> ExecResult {
        if self.evaluate(condition)?.is_truthy() {
            self.execute(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, condition: &Expr, body: &Stmt) -> ExecResult {
        while self.evaluate(condition)?.is_truthy() {
            self.execute(body)?;
        }
        Ok(())
    }

    fn visit_function_stmt(&mut self, name: &Token, _params: &[Token], _body: &[Stmt]) -> ExecResult {
        Err(unsupported(name, "Function declaration").into())
    }

    fn visit_class_stmt(&mut self, name: &Token, _superclass: Option<&Expr>, _methods: &[Stmt]) -> ExecResult {
        Err(unsupported(name, "Class declaration").into())
    }

    fn visit_return_stmt(&mut self, keyword: &Token, _value: Option<&Expr>) -> ExecResult {
        Err(unsupported(keyword, "'return'").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;

    fn tok(kind: TokenKind, lexeme: &str, line: usize) -> Token {
        Token::new(kind, lexeme, None, line)
    }

    fn ident(name: &str) -> Token {
        tok(TokenKind::Identifier, name, 1)
    }

    fn interpreter() -> Interpreter<Vec<u8>> {
        Interpreter::with_output(Vec::new())
    }

    fn printed(interpreter: &Interpreter<Vec<u8>>) -> String {
        String::from_utf8_lossy(interpreter.output()).into_owned()
    }

    fn binary(left: impl Into<Value>, kind: TokenKind, right: impl Into<Value>) -> Expr {
        Expr::binary(Expr::literal(left), tok(kind, "", 1), Expr::literal(right))
    }

    #[test]
    fn test_arithmetic() {
        let mut interpreter = interpreter();

        assert_eq!(interpreter.evaluate(&binary(6.0, TokenKind::Minus, 2.0)), Ok(Value::Number(4.0)));
        assert_eq!(interpreter.evaluate(&binary(6.0, TokenKind::Star, 2.0)), Ok(Value::Number(12.0)));
        assert_eq!(interpreter.evaluate(&binary(6.0, TokenKind::Slash, 4.0)), Ok(Value::Number(1.5)));
        assert_eq!(interpreter.evaluate(&binary(0.1, TokenKind::Plus, 0.2)), Ok(Value::Number(0.1 + 0.2)));
        assert_eq!(interpreter.evaluate(&binary(1.0, TokenKind::Less, 2.0)), Ok(Value::Boolean(true)));
        assert_eq!(interpreter.evaluate(&binary(2.0, TokenKind::LessEqual, 2.0)), Ok(Value::Boolean(true)));
        assert_eq!(interpreter.evaluate(&binary(1.0, TokenKind::Greater, 2.0)), Ok(Value::Boolean(false)));
        assert_eq!(interpreter.evaluate(&binary(2.0, TokenKind::GreaterEqual, 3.0)), Ok(Value::Boolean(false)));
    }

    #[test]
    fn test_grouping() {
        let expr = Expr::grouping(binary(2.0, TokenKind::Star, 2.0));
        assert_eq!(interpreter().evaluate(&expr), Ok(Value::Number(4.0)));
    }

    #[test]
    fn test_unary() {
        let mut interpreter = interpreter();
        let negate = Expr::unary(tok(TokenKind::Minus, "-", 1), Expr::literal(3.0));
        let not = Expr::unary(tok(TokenKind::Bang, "!", 1), Expr::nil());

        assert_eq!(interpreter.evaluate(&negate), Ok(Value::Number(-3.0)));
        assert_eq!(interpreter.evaluate(&not), Ok(Value::Boolean(true)));
    }

    #[test]
    fn test_unary_minus_requires_number() {
        let token = tok(TokenKind::Minus, "", 1);
        let expr = Expr::unary(token.clone(), Expr::literal("muffin"));

        let error = interpreter().evaluate(&expr).unwrap_err();
        assert_eq!(error.token, token);
        assert_eq!(error.message, "Operand must be a number.");
    }

    #[test]
    fn test_bad_operands() {
        let cases: Vec<(TokenKind, Value, Value, &str)> = vec![
            (TokenKind::Minus, "hello".into(), 1.0.into(), "Operand must be a number."),
            (TokenKind::Minus, 1.0.into(), "hello".into(), "Operand must be a number."),
            (TokenKind::Star, "hello".into(), 1.0.into(), "Operand must be a number."),
            (TokenKind::Slash, 1.0.into(), "hello".into(), "Operand must be a number."),
            (TokenKind::Less, Value::Nil, 1.0.into(), "Operand must be a number."),
            (TokenKind::Slash, 1.0.into(), 0.0.into(), "Cannot divide by 0"),
            (TokenKind::Plus, false.into(), true.into(), "Could not add false to true."),
            (TokenKind::Plus, 1.0.into(), true.into(), "Could not add 1 to true."),
            (TokenKind::Plus, 1.1.into(), true.into(), "Could not add 1.1 to true."),
            (TokenKind::Plus, Value::Nil, Value::Nil, "Could not add nil to nil."),
        ];

        for (kind, left, right, expected) in cases {
            let token = tok(kind, "", 1);
            let expr = Expr::binary(Expr::Literal(left), token.clone(), Expr::Literal(right));

            let error = interpreter().evaluate(&expr).unwrap_err();
            assert_eq!(error.token, token);
            assert_eq!(error.message, expected);
        }
    }

    #[test]
    fn test_string_concatenation() {
        let mut interpreter = interpreter();

        assert_eq!(
            interpreter.evaluate(&binary("bread", TokenKind::Plus, "stick")),
            Ok(Value::from("breadstick"))
        );
        assert_eq!(
            interpreter.evaluate(&binary(2.0, TokenKind::Plus, "hello")),
            Ok(Value::from("2hello"))
        );
        assert_eq!(
            interpreter.evaluate(&binary("pi is ", TokenKind::Plus, 3.14)),
            Ok(Value::from("pi is 3.14"))
        );
        assert_eq!(
            interpreter.evaluate(&binary("is ", TokenKind::Plus, true)),
            Ok(Value::from("is true"))
        );
    }

    #[test]
    fn test_equality() {
        let mut interpreter = interpreter();

        assert_eq!(
            interpreter.evaluate(&Expr::binary(Expr::nil(), tok(TokenKind::EqualEqual, "==", 1), Expr::nil())),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            interpreter.evaluate(&Expr::binary(Expr::nil(), tok(TokenKind::EqualEqual, "==", 1), Expr::literal(false))),
            Ok(Value::Boolean(false))
        );
        assert_eq!(
            interpreter.evaluate(&binary(1.0, TokenKind::BangEqual, "1")),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            interpreter.evaluate(&binary("a", TokenKind::EqualEqual, "a")),
            Ok(Value::Boolean(true))
        );
    }

    #[test]
    fn test_logical_returns_deciding_operand() {
        let mut interpreter = interpreter();
        let or = tok(TokenKind::Or, "or", 1);
        let and = tok(TokenKind::And, "and", 1);

        let expr = Expr::logical(Expr::literal("hi"), or.clone(), Expr::literal(false));
        assert_eq!(interpreter.evaluate(&expr), Ok(Value::from("hi")));

        let expr = Expr::logical(Expr::nil(), or, Expr::literal("yes"));
        assert_eq!(interpreter.evaluate(&expr), Ok(Value::from("yes")));

        let expr = Expr::logical(Expr::nil(), and.clone(), Expr::literal("unused"));
        assert_eq!(interpreter.evaluate(&expr), Ok(Value::Nil));

        let expr = Expr::logical(Expr::literal(1.0), and, Expr::literal(2.0));
        assert_eq!(interpreter.evaluate(&expr), Ok(Value::Number(2.0)));
    }

    #[test]
    fn test_logical_short_circuits() {
        // The right side would fail if it were evaluated.
        let expr = Expr::logical(
            Expr::literal(true),
            tok(TokenKind::Or, "or", 1),
            Expr::Variable(ident("undefined")),
        );

        assert_eq!(interpreter().evaluate(&expr), Ok(Value::Boolean(true)));
    }

    #[test]
    fn test_ternary_evaluates_only_taken_branch() {
        let mut interpreter = interpreter();

        let expr = Expr::ternary(Expr::literal(true), Expr::literal(1.0), Expr::Variable(ident("missing")));
        assert_eq!(interpreter.evaluate(&expr), Ok(Value::Number(1.0)));

        let expr = Expr::ternary(Expr::literal(0.0), Expr::literal("zero is truthy"), Expr::nil());
        assert_eq!(interpreter.evaluate(&expr), Ok(Value::from("zero is truthy")));

        let expr = Expr::ternary(Expr::nil(), Expr::Variable(ident("missing")), Expr::literal(2.0));
        assert_eq!(interpreter.evaluate(&expr), Ok(Value::Number(2.0)));
    }

    #[test]
    fn test_var_statement_defines_binding() {
        let mut environment = Environment::new();
        environment.define("unrelated", Value::Nil);

        let mut interpreter = Interpreter::with_environment_and_output(environment, Vec::new());
        let mut diagnostics = Diagnostics::new();
        let statements = vec![
            Stmt::Var {
                name: ident("breakfast"),
                initializer: Some(Expr::literal(3.0)),
            },
            Stmt::Var {
                name: ident("lunch"),
                initializer: None,
            },
        ];

        let outcome = interpreter.interpret(&statements, &mut diagnostics).unwrap();

        assert_eq!(outcome, RunOutcome::Ok);
        let (environment, _) = interpreter.into_parts();
        assert_eq!(environment.get(&ident("breakfast")), Ok(Value::Number(3.0)));
        assert_eq!(environment.get(&ident("lunch")), Ok(Value::Nil));
    }

    #[test]
    fn test_assign_returns_value() {
        let mut interpreter = interpreter();
        interpreter.environment_mut().define("breakfast", Value::from("toast"));

        let expr = Expr::assign(ident("breakfast"), Expr::literal("muffin"));

        assert_eq!(interpreter.evaluate(&expr), Ok(Value::from("muffin")));
        assert_eq!(interpreter.environment().get(&ident("breakfast")), Ok(Value::from("muffin")));
    }

    #[test]
    fn test_print_statement() {
        let mut interpreter = interpreter();
        let mut diagnostics = Diagnostics::new();

        let statements = vec![
            Stmt::Print(Expr::literal("hello, world!")),
            Stmt::Print(Expr::literal(4.0)),
            Stmt::Print(Expr::literal(4.5)),
            Stmt::Print(Expr::nil()),
            Stmt::Print(Expr::literal(true)),
        ];
        interpreter.interpret(&statements, &mut diagnostics).unwrap();

        assert_eq!(printed(&interpreter), "hello, world!\n4\n4.5\nnil\ntrue\n");
    }

    #[test]
    fn test_block_reassigns_global() {
        let mut interpreter = interpreter();
        interpreter.environment_mut().define("breakfast", Value::from("muffin"));
        let mut diagnostics = Diagnostics::new();

        let block = Stmt::Block(vec![
            Stmt::Expression(Expr::assign(ident("breakfast"), Expr::literal("toast"))),
            Stmt::Print(Expr::Variable(ident("breakfast"))),
        ]);
        interpreter.interpret(&[block], &mut diagnostics).unwrap();

        assert_eq!(printed(&interpreter), "toast\n");
        assert_eq!(interpreter.environment().get(&ident("breakfast")), Ok(Value::from("toast")));
    }

    #[test]
    fn test_block_shadowing() {
        let mut interpreter = interpreter();
        let mut diagnostics = Diagnostics::new();

        let statements = vec![
            Stmt::Var {
                name: ident("x"),
                initializer: Some(Expr::literal("muffin")),
            },
            Stmt::Block(vec![
                Stmt::Var {
                    name: ident("x"),
                    initializer: Some(Expr::literal("toast")),
                },
                Stmt::Print(Expr::Variable(ident("x"))),
            ]),
            Stmt::Print(Expr::Variable(ident("x"))),
        ];
        interpreter.interpret(&statements, &mut diagnostics).unwrap();

        assert_eq!(printed(&interpreter), "toast\nmuffin\n");
        assert_eq!(interpreter.environment().get(&ident("x")), Ok(Value::from("muffin")));
    }

    #[test]
    fn test_if_branches() {
        for (condition, expected) in [(true, "yay\n"), (false, "boo\n")] {
            let mut interpreter = interpreter();
            let mut diagnostics = Diagnostics::new();
            let statement = Stmt::If {
                condition: Expr::literal(condition),
                then_branch: Box::new(Stmt::Print(Expr::literal("yay"))),
                else_branch: Some(Box::new(Stmt::Print(Expr::literal("boo")))),
            };

            interpreter.interpret(&[statement], &mut diagnostics).unwrap();
            assert_eq!(printed(&interpreter), expected);
        }
    }

    #[test]
    fn test_if_without_else() {
        let mut interpreter = interpreter();
        let mut diagnostics = Diagnostics::new();
        let statement = Stmt::If {
            condition: Expr::nil(),
            then_branch: Box::new(Stmt::Print(Expr::literal("never"))),
            else_branch: None,
        };

        interpreter.interpret(&[statement], &mut diagnostics).unwrap();
        assert_eq!(printed(&interpreter), "");
    }

    #[test]
    fn test_runtime_error_is_reported_once_and_stops_batch() {
        let mut interpreter = interpreter();
        let mut diagnostics = Diagnostics::new();

        let statements = vec![
            Stmt::Var {
                name: ident("a"),
                initializer: Some(Expr::literal(1.0)),
            },
            Stmt::Print(Expr::Variable(tok(TokenKind::Identifier, "breakfast", 2))),
            Stmt::Print(Expr::literal("unreachable")),
        ];
        let outcome = interpreter.interpret(&statements, &mut diagnostics).unwrap();

        assert_eq!(outcome, RunOutcome::RuntimeError);
        assert_eq!(printed(&interpreter), "");
        assert_eq!(diagnostics.messages(), vec!["Undefined variable breakfast\n[line 2]"]);
        // Bindings made before the error survive.
        assert_eq!(interpreter.environment().get(&ident("a")), Ok(Value::Number(1.0)));
    }

    #[test]
    fn test_scope_restored_after_error_in_block() {
        let mut interpreter = interpreter();
        let mut diagnostics = Diagnostics::new();

        let block = Stmt::Block(vec![
            Stmt::Var {
                name: ident("inner"),
                initializer: Some(Expr::literal(1.0)),
            },
            Stmt::Block(vec![Stmt::Expression(binary(1.0, TokenKind::Slash, 0.0))]),
        ]);
        interpreter.interpret(&[block], &mut diagnostics).unwrap();

        assert_eq!(diagnostics.messages(), vec!["Cannot divide by 0\n[line 1]"]);
        assert_eq!(interpreter.environment().depth(), 1);
        assert!(interpreter.environment().get(&ident("inner")).is_err());

        // A later batch starts cleanly.
        diagnostics.clear();
        let outcome = interpreter
            .interpret(&[Stmt::Print(Expr::literal("fine"))], &mut diagnostics)
            .unwrap();
        assert_eq!(outcome, RunOutcome::Ok);
        assert!(diagnostics.is_empty());
        assert_eq!(printed(&interpreter), "fine\n");
    }

    #[test]
    fn test_reserved_constructs_are_rejected() {
        let mut interpreter = interpreter();
        let expr = Expr::This(tok(TokenKind::This, "this", 4));

        let error = interpreter.evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "'this' is not supported.");
        assert_eq!(error.token.line, 4);

        let mut diagnostics = Diagnostics::new();
        let statement = Stmt::Return {
            keyword: tok(TokenKind::Return, "return", 1),
            value: None,
        };
        let outcome = interpreter.interpret(&[statement], &mut diagnostics).unwrap();
        assert_eq!(outcome, RunOutcome::RuntimeError);
    }
}
