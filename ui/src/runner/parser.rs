//! Recursive-descent parser producing the snippet AST.
//!
//! The grammar is a lenient JS-flavoured subset: semicolons are optional at
//! statement boundaries, trailing commas are accepted, and `let`/`const`/
//! `var` take a single declarator.

use super::ast::{ArrowBody, AssignOp, BinaryOp, Expr, LogicalOp, Stmt, UnaryOp, UpdateOp};
use super::lexer::{tokenize, Token};
use super::RunnerError;

pub fn parse(source: &str) -> Result<Vec<Stmt>, RunnerError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser { tokens, pos: 0 };
    let program = parser.parse_stmt_list(None)?;
    if let Some(extra) = parser.peek() {
        return Err(unexpected(extra));
    }
    Ok(program)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> Result<(), RunnerError> {
        if self.eat(&token) {
            Ok(())
        } else {
            match self.peek() {
                Some(found) => Err(RunnerError::Syntax(format!(
                    "Unexpected token {}, expected {}",
                    describe(found),
                    describe(&token)
                ))),
                None => Err(RunnerError::Syntax(format!(
                    "Unexpected end of input, expected {}",
                    describe(&token)
                ))),
            }
        }
    }

    fn expect_ident(&mut self) -> Result<String, RunnerError> {
        match self.advance() {
            Some(Token::Ident(name)) => Ok(name),
            Some(other) => Err(unexpected(&other)),
            None => Err(RunnerError::Syntax("Unexpected end of input".into())),
        }
    }

    fn at_keyword(&self, word: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(name)) if name == word)
    }

    /// Parse statements until `stop` (or end of input when `stop` is None).
    fn parse_stmt_list(&mut self, stop: Option<&Token>) -> Result<Vec<Stmt>, RunnerError> {
        let mut stmts = Vec::new();
        loop {
            while self.eat(&Token::Semi) {}
            match (self.peek(), stop) {
                (None, _) => break,
                (Some(token), Some(stop)) if token == stop => break,
                _ => stmts.push(self.parse_stmt()?),
            }
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, RunnerError> {
        if self.at_keyword("let") || self.at_keyword("const") || self.at_keyword("var") {
            self.advance();
            return self.parse_declaration();
        }
        if self.at_keyword("function") {
            // A `function` at statement position is a declaration.
            self.advance();
            let name = self.expect_ident()?;
            let params = self.parse_param_list()?;
            let body = self.parse_brace_block()?;
            return Ok(Stmt::Func { name, params, body });
        }
        if self.at_keyword("if") {
            self.advance();
            return self.parse_if();
        }
        if self.at_keyword("while") {
            self.advance();
            self.expect(Token::LParen)?;
            let cond = self.parse_expr()?;
            self.expect(Token::RParen)?;
            let body = self.parse_body()?;
            return Ok(Stmt::While { cond, body });
        }
        if self.at_keyword("for") {
            self.advance();
            return self.parse_for();
        }
        if self.at_keyword("return") {
            self.advance();
            let value = if self.stmt_boundary() {
                None
            } else {
                Some(self.parse_expr()?)
            };
            self.terminate_stmt();
            return Ok(Stmt::Return(value));
        }
        if self.at_keyword("break") {
            self.advance();
            self.terminate_stmt();
            return Ok(Stmt::Break);
        }
        if self.at_keyword("continue") {
            self.advance();
            self.terminate_stmt();
            return Ok(Stmt::Continue);
        }
        if self.at_keyword("throw") {
            self.advance();
            let value = self.parse_expr()?;
            self.terminate_stmt();
            return Ok(Stmt::Throw(value));
        }
        if self.at_keyword("try") {
            self.advance();
            let body = self.parse_brace_block()?;
            if !self.at_keyword("catch") {
                return Err(RunnerError::Syntax("Missing catch after try".into()));
            }
            self.advance();
            let binding = if self.eat(&Token::LParen) {
                let name = self.expect_ident()?;
                self.expect(Token::RParen)?;
                Some(name)
            } else {
                None
            };
            let handler = self.parse_brace_block()?;
            return Ok(Stmt::Try {
                body,
                binding,
                handler,
            });
        }
        if self.peek() == Some(&Token::LBrace) {
            return Ok(Stmt::Block(self.parse_brace_block()?));
        }

        let expr = self.parse_expr()?;
        self.terminate_stmt();
        Ok(Stmt::Expr(expr))
    }

    fn parse_declaration(&mut self) -> Result<Stmt, RunnerError> {
        let name = self.expect_ident()?;
        let init = if self.eat(&Token::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.terminate_stmt();
        Ok(Stmt::Declare { name, init })
    }

    fn parse_if(&mut self) -> Result<Stmt, RunnerError> {
        self.expect(Token::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(Token::RParen)?;
        let then = self.parse_body()?;
        let otherwise = if self.at_keyword("else") {
            self.advance();
            if self.at_keyword("if") {
                self.advance();
                Some(vec![self.parse_if()?])
            } else {
                Some(self.parse_body()?)
            }
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then,
            otherwise,
        })
    }

    fn parse_for(&mut self) -> Result<Stmt, RunnerError> {
        self.expect(Token::LParen)?;

        let init = if self.eat(&Token::Semi) {
            None
        } else if self.at_keyword("let") || self.at_keyword("const") || self.at_keyword("var") {
            self.advance();
            let name = self.expect_ident()?;
            let init = if self.eat(&Token::Assign) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            self.expect(Token::Semi)?;
            Some(Box::new(Stmt::Declare { name, init }))
        } else {
            let expr = self.parse_expr()?;
            self.expect(Token::Semi)?;
            Some(Box::new(Stmt::Expr(expr)))
        };

        let cond = if self.peek() == Some(&Token::Semi) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(Token::Semi)?;

        let update = if self.peek() == Some(&Token::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(Token::RParen)?;

        let body = self.parse_body()?;
        Ok(Stmt::For {
            init,
            cond,
            update,
            body,
        })
    }

    /// Body of a control statement: braced block or a single statement.
    fn parse_body(&mut self) -> Result<Vec<Stmt>, RunnerError> {
        if self.peek() == Some(&Token::LBrace) {
            self.parse_brace_block()
        } else {
            Ok(vec![self.parse_stmt()?])
        }
    }

    fn parse_brace_block(&mut self) -> Result<Vec<Stmt>, RunnerError> {
        self.expect(Token::LBrace)?;
        let stmts = self.parse_stmt_list(Some(&Token::RBrace))?;
        self.expect(Token::RBrace)?;
        Ok(stmts)
    }

    fn stmt_boundary(&self) -> bool {
        matches!(self.peek(), None | Some(Token::Semi) | Some(Token::RBrace))
    }

    fn terminate_stmt(&mut self) {
        let _ = self.eat(&Token::Semi);
    }

    // ----- expressions -----

    fn parse_expr(&mut self) -> Result<Expr, RunnerError> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr, RunnerError> {
        let left = self.parse_ternary()?;

        let op = match self.peek() {
            Some(Token::Assign) => AssignOp::Set,
            Some(Token::PlusAssign) => AssignOp::Add,
            Some(Token::MinusAssign) => AssignOp::Sub,
            Some(Token::StarAssign) => AssignOp::Mul,
            Some(Token::SlashAssign) => AssignOp::Div,
            _ => return Ok(left),
        };

        if !matches!(left, Expr::Ident(_) | Expr::Member { .. } | Expr::Index { .. }) {
            return Err(RunnerError::Syntax(
                "Invalid left-hand side in assignment".into(),
            ));
        }

        self.advance();
        let value = self.parse_assignment()?;
        Ok(Expr::Assign {
            target: Box::new(left),
            op,
            value: Box::new(value),
        })
    }

    fn parse_ternary(&mut self) -> Result<Expr, RunnerError> {
        let cond = self.parse_nullish()?;
        if !self.eat(&Token::Question) {
            return Ok(cond);
        }
        let then = self.parse_assignment()?;
        self.expect(Token::Colon)?;
        let otherwise = self.parse_assignment()?;
        Ok(Expr::Ternary {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn parse_nullish(&mut self) -> Result<Expr, RunnerError> {
        let mut left = self.parse_or()?;
        while self.eat(&Token::NullishCoalesce) {
            let right = self.parse_or()?;
            left = Expr::Logical {
                op: LogicalOp::Nullish,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, RunnerError> {
        let mut left = self.parse_and()?;
        while self.eat(&Token::OrOr) {
            let right = self.parse_and()?;
            left = Expr::Logical {
                op: LogicalOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, RunnerError> {
        let mut left = self.parse_equality()?;
        while self.eat(&Token::AndAnd) {
            let right = self.parse_equality()?;
            left = Expr::Logical {
                op: LogicalOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, RunnerError> {
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.peek() {
                Some(Token::EqEq) | Some(Token::EqEqEq) => BinaryOp::Eq,
                Some(Token::NotEq) | Some(Token::NotEqEq) => BinaryOp::NotEq,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_relational()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn parse_relational(&mut self) -> Result<Expr, RunnerError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                Some(Token::Lt) => BinaryOp::Lt,
                Some(Token::Le) => BinaryOp::Le,
                Some(Token::Gt) => BinaryOp::Gt,
                Some(Token::Ge) => BinaryOp::Ge,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_additive()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, RunnerError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, RunnerError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Rem,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, RunnerError> {
        match self.peek() {
            Some(Token::Bang) => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Expr::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                })
            }
            Some(Token::Minus) => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Expr::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                })
            }
            Some(Token::PlusPlus) | Some(Token::MinusMinus) => {
                let op = if self.eat(&Token::PlusPlus) {
                    UpdateOp::Increment
                } else {
                    self.advance();
                    UpdateOp::Decrement
                };
                let target = self.parse_unary()?;
                self.check_update_target(&target)?;
                Ok(Expr::Update {
                    op,
                    prefix: true,
                    target: Box::new(target),
                })
            }
            _ => self.parse_postfix(),
        }
    }

    fn check_update_target(&self, target: &Expr) -> Result<(), RunnerError> {
        if matches!(target, Expr::Ident(_) | Expr::Member { .. } | Expr::Index { .. }) {
            Ok(())
        } else {
            Err(RunnerError::Syntax(
                "Invalid target for increment or decrement".into(),
            ))
        }
    }

    fn parse_postfix(&mut self) -> Result<Expr, RunnerError> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.peek() {
                Some(Token::Dot) => {
                    self.advance();
                    let property = self.expect_ident()?;
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property,
                    };
                }
                Some(Token::LBracket) => {
                    self.advance();
                    let index = self.parse_expr()?;
                    self.expect(Token::RBracket)?;
                    expr = Expr::Index {
                        object: Box::new(expr),
                        index: Box::new(index),
                    };
                }
                Some(Token::LParen) => {
                    let args = self.parse_arg_list()?;
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        args,
                    };
                }
                _ => break,
            }
        }

        if matches!(self.peek(), Some(Token::PlusPlus) | Some(Token::MinusMinus)) {
            self.check_update_target(&expr)?;
            let op = if self.eat(&Token::PlusPlus) {
                UpdateOp::Increment
            } else {
                self.advance();
                UpdateOp::Decrement
            };
            expr = Expr::Update {
                op,
                prefix: false,
                target: Box::new(expr),
            };
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, RunnerError> {
        match self.peek().cloned() {
            Some(Token::Number(value)) => {
                self.advance();
                Ok(Expr::Number(value))
            }
            Some(Token::Str(value)) => {
                self.advance();
                Ok(Expr::Str(value))
            }
            Some(Token::LBracket) => self.parse_array(),
            Some(Token::LBrace) => self.parse_object(),
            Some(Token::LParen) => self.parse_paren_or_arrow(),
            Some(Token::Ident(name)) => match name.as_str() {
                "true" => {
                    self.advance();
                    Ok(Expr::Bool(true))
                }
                "false" => {
                    self.advance();
                    Ok(Expr::Bool(false))
                }
                "null" => {
                    self.advance();
                    Ok(Expr::Null)
                }
                "undefined" => {
                    self.advance();
                    Ok(Expr::Undefined)
                }
                "new" => {
                    self.advance();
                    let constructor = self.expect_ident()?;
                    let args = if self.peek() == Some(&Token::LParen) {
                        self.parse_arg_list()?
                    } else {
                        Vec::new()
                    };
                    Ok(Expr::New { constructor, args })
                }
                "function" => {
                    // Anonymous function expression; behaves like an arrow
                    // in this subset (no `this`).
                    self.advance();
                    if matches!(self.peek(), Some(Token::Ident(_))) {
                        self.advance();
                    }
                    let params = self.parse_param_list()?;
                    let body = self.parse_brace_block()?;
                    Ok(Expr::Arrow {
                        params,
                        body: ArrowBody::Block(body),
                    })
                }
                _ => {
                    self.advance();
                    if self.eat(&Token::Arrow) {
                        let body = self.parse_arrow_body()?;
                        Ok(Expr::Arrow {
                            params: vec![name],
                            body,
                        })
                    } else {
                        Ok(Expr::Ident(name))
                    }
                }
            },
            Some(other) => Err(unexpected(&other)),
            None => Err(RunnerError::Syntax("Unexpected end of input".into())),
        }
    }

    fn parse_array(&mut self) -> Result<Expr, RunnerError> {
        self.expect(Token::LBracket)?;
        let mut items = Vec::new();
        while self.peek() != Some(&Token::RBracket) {
            items.push(self.parse_assignment()?);
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RBracket)?;
        Ok(Expr::Array(items))
    }

    fn parse_object(&mut self) -> Result<Expr, RunnerError> {
        self.expect(Token::LBrace)?;
        let mut entries = Vec::new();
        while self.peek() != Some(&Token::RBrace) {
            let key = match self.advance() {
                Some(Token::Ident(name)) => name,
                Some(Token::Str(text)) => text,
                Some(Token::Number(value)) => super::value::js_number_string(value),
                Some(other) => return Err(unexpected(&other)),
                None => return Err(RunnerError::Syntax("Unexpected end of input".into())),
            };
            let value = if self.eat(&Token::Colon) {
                Some(self.parse_assignment()?)
            } else {
                None // shorthand
            };
            entries.push((key, value));
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RBrace)?;
        Ok(Expr::Object(entries))
    }

    /// Disambiguate `(a, b) => …` from a parenthesized expression by
    /// scanning for `) =>` before committing.
    fn parse_paren_or_arrow(&mut self) -> Result<Expr, RunnerError> {
        let start = self.pos;
        if let Some(params) = self.try_parse_arrow_params()? {
            let body = self.parse_arrow_body()?;
            return Ok(Expr::Arrow { params, body });
        }
        self.pos = start;
        self.expect(Token::LParen)?;
        let expr = self.parse_expr()?;
        self.expect(Token::RParen)?;
        Ok(expr)
    }

    fn try_parse_arrow_params(&mut self) -> Result<Option<Vec<String>>, RunnerError> {
        let start = self.pos;
        if !self.eat(&Token::LParen) {
            return Ok(None);
        }
        let mut params = Vec::new();
        loop {
            match self.peek() {
                Some(Token::RParen) => break,
                Some(Token::Ident(name)) => {
                    params.push(name.clone());
                    self.advance();
                    if !self.eat(&Token::Comma) {
                        break;
                    }
                }
                _ => {
                    self.pos = start;
                    return Ok(None);
                }
            }
        }
        if !self.eat(&Token::RParen) || self.peek() != Some(&Token::Arrow) {
            self.pos = start;
            return Ok(None);
        }
        self.advance(); // =>
        Ok(Some(params))
    }

    fn parse_arrow_body(&mut self) -> Result<ArrowBody, RunnerError> {
        if self.peek() == Some(&Token::LBrace) {
            Ok(ArrowBody::Block(self.parse_brace_block()?))
        } else {
            Ok(ArrowBody::Expr(Box::new(self.parse_assignment()?)))
        }
    }

    fn parse_param_list(&mut self) -> Result<Vec<String>, RunnerError> {
        self.expect(Token::LParen)?;
        let mut params = Vec::new();
        while self.peek() != Some(&Token::RParen) {
            params.push(self.expect_ident()?);
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RParen)?;
        Ok(params)
    }

    fn parse_arg_list(&mut self) -> Result<Vec<Expr>, RunnerError> {
        self.expect(Token::LParen)?;
        let mut args = Vec::new();
        while self.peek() != Some(&Token::RParen) {
            args.push(self.parse_assignment()?);
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RParen)?;
        Ok(args)
    }
}

fn unexpected(token: &Token) -> RunnerError {
    RunnerError::Syntax(format!("Unexpected token {}", describe(token)))
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(value) => super::value::js_number_string(*value),
        Token::Str(text) => format!("\"{text}\""),
        Token::Ident(name) => name.clone(),
        Token::LParen => "(".into(),
        Token::RParen => ")".into(),
        Token::LBrace => "{".into(),
        Token::RBrace => "}".into(),
        Token::LBracket => "[".into(),
        Token::RBracket => "]".into(),
        Token::Comma => ",".into(),
        Token::Dot => ".".into(),
        Token::Semi => ";".into(),
        Token::Colon => ":".into(),
        Token::Question => "?".into(),
        Token::Arrow => "=>".into(),
        Token::Assign => "=".into(),
        Token::PlusAssign => "+=".into(),
        Token::MinusAssign => "-=".into(),
        Token::StarAssign => "*=".into(),
        Token::SlashAssign => "/=".into(),
        Token::Plus => "+".into(),
        Token::Minus => "-".into(),
        Token::Star => "*".into(),
        Token::Slash => "/".into(),
        Token::Percent => "%".into(),
        Token::PlusPlus => "++".into(),
        Token::MinusMinus => "--".into(),
        Token::EqEq => "==".into(),
        Token::EqEqEq => "===".into(),
        Token::NotEq => "!=".into(),
        Token::NotEqEq => "!==".into(),
        Token::Lt => "<".into(),
        Token::Le => "<=".into(),
        Token::Gt => ">".into(),
        Token::Ge => ">=".into(),
        Token::AndAnd => "&&".into(),
        Token::OrOr => "||".into(),
        Token::NullishCoalesce => "??".into(),
        Token::Bang => "!".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_declaration_and_call() {
        let program = parse("let x = 1; console.log(x)").unwrap();
        assert_eq!(program.len(), 2);
        assert!(matches!(program[0], Stmt::Declare { .. }));
        assert!(matches!(program[1], Stmt::Expr(Expr::Call { .. })));
    }

    #[test]
    fn semicolons_are_optional() {
        let program = parse("let a = 1\nlet b = 2\nconsole.log(a + b)").unwrap();
        assert_eq!(program.len(), 3);
    }

    #[test]
    fn parses_arrow_functions() {
        let program = parse("const add = (a, b) => a + b").unwrap();
        match &program[0] {
            Stmt::Declare {
                init: Some(Expr::Arrow { params, .. }),
                ..
            } => assert_eq!(params, &["a", "b"]),
            other => panic!("expected arrow declaration, got {other:?}"),
        }
    }

    #[test]
    fn paren_expression_is_not_an_arrow() {
        let program = parse("(1 + 2) * 3").unwrap();
        assert!(matches!(program[0], Stmt::Expr(Expr::Binary { .. })));
    }

    #[test]
    fn parses_for_loop_with_postfix_update() {
        let program = parse("for (let i = 0; i < 3; i++) { console.log(i) }").unwrap();
        match &program[0] {
            Stmt::For { init, cond, update, body } => {
                assert!(init.is_some());
                assert!(cond.is_some());
                assert!(matches!(update, Some(Expr::Update { prefix: false, .. })));
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected for loop, got {other:?}"),
        }
    }

    #[test]
    fn parses_try_catch_and_throw() {
        let program = parse("try { throw new Error('boom') } catch (e) { console.log(e.message) }")
            .unwrap();
        match &program[0] {
            Stmt::Try { binding, .. } => assert_eq!(binding.as_deref(), Some("e")),
            other => panic!("expected try statement, got {other:?}"),
        }
    }

    #[test]
    fn object_literal_with_shorthand() {
        let program = parse("let point = { x: 1, y }").unwrap();
        match &program[0] {
            Stmt::Declare {
                init: Some(Expr::Object(entries)),
                ..
            } => {
                assert_eq!(entries.len(), 2);
                assert!(entries[1].1.is_none());
            }
            other => panic!("expected object declaration, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_assignment_target() {
        assert!(parse("1 = 2").is_err());
    }

    #[test]
    fn rejects_try_without_catch() {
        assert!(parse("try { 1 }").is_err());
    }
}
