//! Tree-walking interpreter for the snippet language.
//!
//! The only capability handed to a snippet is the logging sink, passed as an
//! explicit parameter rather than a patched global. There is deliberately no
//! step budget: a non-terminating snippet blocks its caller (the UI accepts
//! that). Call depth is bounded so runaway recursion surfaces as the usual
//! stack-size error instead of aborting the host.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::ast::{ArrowBody, AssignOp, BinaryOp, Expr, LogicalOp, Stmt, UnaryOp, UpdateOp};
use super::value::{format_log_args, to_json, ErrorValue, Exception, NativeFn, Value};

const MAX_CALL_DEPTH: usize = 200;

pub type Env = Rc<RefCell<Scope>>;

pub struct Scope {
    vars: HashMap<String, Value>,
    parent: Option<Env>,
}

impl Scope {
    pub fn root() -> Env {
        Rc::new(RefCell::new(Scope {
            vars: HashMap::new(),
            parent: None,
        }))
    }

    fn child(parent: &Env) -> Env {
        Rc::new(RefCell::new(Scope {
            vars: HashMap::new(),
            parent: Some(parent.clone()),
        }))
    }

    fn lookup(env: &Env, name: &str) -> Option<Value> {
        let scope = env.borrow();
        if let Some(value) = scope.vars.get(name) {
            return Some(value.clone());
        }
        scope.parent.as_ref().and_then(|parent| Scope::lookup(parent, name))
    }

    fn declare(env: &Env, name: &str, value: Value) {
        env.borrow_mut().vars.insert(name.to_string(), value);
    }

    /// Assign to the nearest binding; sloppy-mode fallback creates the name
    /// at the root scope, like the original's unscoped user code.
    fn assign(env: &Env, name: &str, value: Value) {
        let mut current = env.clone();
        loop {
            if current.borrow().vars.contains_key(name) {
                current.borrow_mut().vars.insert(name.to_string(), value);
                return;
            }
            let parent = current.borrow().parent.clone();
            match parent {
                Some(parent) => current = parent,
                None => {
                    current.borrow_mut().vars.insert(name.to_string(), value);
                    return;
                }
            }
        }
    }
}

pub struct Function {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: ArrowBody,
    pub env: Env,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not walk the captured environment: it may be cyclic.
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

enum Flow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

/// Execute a program against a fresh root scope, routing every formatted
/// `console.log` line to `sink`.
pub fn run_program(program: &[Stmt], sink: &mut dyn FnMut(&str)) -> Result<(), Exception> {
    let env = Scope::root();
    let mut interp = Interpreter { sink, depth: 0 };
    interp.exec_stmts(&env, program).map(|_| ())
}

struct Interpreter<'a> {
    sink: &'a mut dyn FnMut(&str),
    depth: usize,
}

impl Interpreter<'_> {
    fn exec_stmts(&mut self, env: &Env, stmts: &[Stmt]) -> Result<Flow, Exception> {
        // Function declarations hoist to the top of their block.
        for stmt in stmts {
            if let Stmt::Func { name, params, body } = stmt {
                let function = Function {
                    name: Some(name.clone()),
                    params: params.clone(),
                    body: ArrowBody::Block(body.clone()),
                    env: env.clone(),
                };
                Scope::declare(env, name, Value::Function(Rc::new(function)));
            }
        }

        for stmt in stmts {
            match self.exec_stmt(env, stmt)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, env: &Env, stmt: &Stmt) -> Result<Flow, Exception> {
        match stmt {
            Stmt::Declare { name, init } => {
                let value = match init {
                    Some(expr) => self.eval(env, expr)?,
                    None => Value::Undefined,
                };
                Scope::declare(env, name, value);
                Ok(Flow::Normal)
            }
            Stmt::Func { .. } => Ok(Flow::Normal), // hoisted in exec_stmts
            Stmt::Expr(expr) => {
                self.eval(env, expr)?;
                Ok(Flow::Normal)
            }
            Stmt::Block(stmts) => {
                let scope = Scope::child(env);
                self.exec_stmts(&scope, stmts)
            }
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                if self.eval(env, cond)?.is_truthy() {
                    let scope = Scope::child(env);
                    self.exec_stmts(&scope, then)
                } else if let Some(otherwise) = otherwise {
                    let scope = Scope::child(env);
                    self.exec_stmts(&scope, otherwise)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While { cond, body } => {
                while self.eval(env, cond)?.is_truthy() {
                    let scope = Scope::child(env);
                    match self.exec_stmts(&scope, body)? {
                        Flow::Break => break,
                        Flow::Continue | Flow::Normal => {}
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                let loop_scope = Scope::child(env);
                if let Some(init) = init {
                    self.exec_stmt(&loop_scope, init)?;
                }
                loop {
                    if let Some(cond) = cond {
                        if !self.eval(&loop_scope, cond)?.is_truthy() {
                            break;
                        }
                    }
                    let scope = Scope::child(&loop_scope);
                    match self.exec_stmts(&scope, body)? {
                        Flow::Break => break,
                        Flow::Continue | Flow::Normal => {}
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                    if let Some(update) = update {
                        self.eval(&loop_scope, update)?;
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval(env, expr)?,
                    None => Value::Undefined,
                };
                Ok(Flow::Return(value))
            }
            Stmt::Break => Ok(Flow::Break),
            Stmt::Continue => Ok(Flow::Continue),
            Stmt::Throw(expr) => {
                let value = self.eval(env, expr)?;
                Err(Exception::thrown(value))
            }
            Stmt::Try {
                body,
                binding,
                handler,
            } => {
                let scope = Scope::child(env);
                match self.exec_stmts(&scope, body) {
                    Ok(flow) => Ok(flow),
                    Err(exception) => {
                        let scope = Scope::child(env);
                        if let Some(name) = binding {
                            Scope::declare(&scope, name, exception.value);
                        }
                        self.exec_stmts(&scope, handler)
                    }
                }
            }
        }
    }

    fn eval(&mut self, env: &Env, expr: &Expr) -> Result<Value, Exception> {
        match expr {
            Expr::Number(value) => Ok(Value::Number(*value)),
            Expr::Str(value) => Ok(Value::Str(value.clone())),
            Expr::Bool(value) => Ok(Value::Bool(*value)),
            Expr::Null => Ok(Value::Null),
            Expr::Undefined => Ok(Value::Undefined),
            Expr::Ident(name) => self.resolve(env, name),
            Expr::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval(env, item)?);
                }
                Ok(Value::array(values))
            }
            Expr::Object(entries) => {
                let mut values = Vec::with_capacity(entries.len());
                for (key, entry) in entries {
                    let value = match entry {
                        Some(expr) => self.eval(env, expr)?,
                        None => self.resolve(env, key)?,
                    };
                    values.push((key.clone(), value));
                }
                Ok(Value::object(values))
            }
            Expr::Member { object, property } => {
                if let Some(value) = self.builtin_namespace_member(env, object, property)? {
                    return Ok(value);
                }
                let object = self.eval(env, object)?;
                self.member_value(&object, property)
            }
            Expr::Index { object, index } => {
                let object = self.eval(env, object)?;
                let index = self.eval(env, index)?;
                self.index_value(&object, &index)
            }
            Expr::Call { callee, args } => self.eval_call(env, callee, args),
            Expr::New { constructor, args } => {
                if constructor != "Error" {
                    return Err(Exception::fault(format!(
                        "{constructor} is not a constructor"
                    )));
                }
                let message = match args.first() {
                    Some(arg) => self.eval(env, arg)?.to_display_string(),
                    None => String::new(),
                };
                Ok(Value::Error(Rc::new(ErrorValue {
                    name: "Error".into(),
                    message,
                })))
            }
            Expr::Arrow { params, body } => Ok(Value::Function(Rc::new(Function {
                name: None,
                params: params.clone(),
                body: body.clone(),
                env: env.clone(),
            }))),
            Expr::Unary { op, operand } => {
                let value = self.eval(env, operand)?;
                Ok(match op {
                    UnaryOp::Not => Value::Bool(!value.is_truthy()),
                    UnaryOp::Neg => Value::Number(-value.to_number()),
                })
            }
            Expr::Update { op, prefix, target } => {
                let old = self.eval(env, target)?.to_number();
                let new = match op {
                    UpdateOp::Increment => old + 1.0,
                    UpdateOp::Decrement => old - 1.0,
                };
                self.write_target(env, target, Value::Number(new))?;
                Ok(Value::Number(if *prefix { new } else { old }))
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval(env, left)?;
                let right = self.eval(env, right)?;
                Ok(binary_op(*op, &left, &right))
            }
            Expr::Logical { op, left, right } => {
                let left = self.eval(env, left)?;
                let take_right = match op {
                    LogicalOp::And => left.is_truthy(),
                    LogicalOp::Or => !left.is_truthy(),
                    LogicalOp::Nullish => matches!(left, Value::Null | Value::Undefined),
                };
                if take_right {
                    self.eval(env, right)
                } else {
                    Ok(left)
                }
            }
            Expr::Ternary {
                cond,
                then,
                otherwise,
            } => {
                if self.eval(env, cond)?.is_truthy() {
                    self.eval(env, then)
                } else {
                    self.eval(env, otherwise)
                }
            }
            Expr::Assign { target, op, value } => {
                let value = match op {
                    AssignOp::Set => self.eval(env, value)?,
                    compound => {
                        let old = self.eval(env, target)?;
                        let rhs = self.eval(env, value)?;
                        let binary = match compound {
                            AssignOp::Add => BinaryOp::Add,
                            AssignOp::Sub => BinaryOp::Sub,
                            AssignOp::Mul => BinaryOp::Mul,
                            AssignOp::Div => BinaryOp::Div,
                            AssignOp::Set => unreachable!(),
                        };
                        binary_op(binary, &old, &rhs)
                    }
                };
                self.write_target(env, target, value.clone())?;
                Ok(value)
            }
        }
    }

    fn resolve(&mut self, env: &Env, name: &str) -> Result<Value, Exception> {
        if let Some(value) = Scope::lookup(env, name) {
            return Ok(value);
        }
        match name {
            "NaN" => Ok(Value::Number(f64::NAN)),
            "Infinity" => Ok(Value::Number(f64::INFINITY)),
            _ => Err(Exception::fault(format!("{name} is not defined"))),
        }
    }

    /// `console.log`, `Math.floor`, `JSON.stringify`, … — resolved only when
    /// the namespace identifier is not shadowed by a user binding.
    fn builtin_namespace_member(
        &mut self,
        env: &Env,
        object: &Expr,
        property: &str,
    ) -> Result<Option<Value>, Exception> {
        let Expr::Ident(namespace) = object else {
            return Ok(None);
        };
        if Scope::lookup(env, namespace).is_some() {
            return Ok(None);
        }

        let value = match (namespace.as_str(), property) {
            ("console", "log") => Some(Value::Native(NativeFn::ConsoleLog)),
            ("Math", "floor") => Some(Value::Native(NativeFn::MathFloor)),
            ("Math", "ceil") => Some(Value::Native(NativeFn::MathCeil)),
            ("Math", "round") => Some(Value::Native(NativeFn::MathRound)),
            ("Math", "abs") => Some(Value::Native(NativeFn::MathAbs)),
            ("Math", "min") => Some(Value::Native(NativeFn::MathMin)),
            ("Math", "max") => Some(Value::Native(NativeFn::MathMax)),
            ("Math", "sqrt") => Some(Value::Native(NativeFn::MathSqrt)),
            ("Math", "pow") => Some(Value::Native(NativeFn::MathPow)),
            ("Math", "random") => Some(Value::Native(NativeFn::MathRandom)),
            ("Math", "PI") => Some(Value::Number(std::f64::consts::PI)),
            ("JSON", "stringify") => Some(Value::Native(NativeFn::JsonStringify)),
            ("Object", "keys") => Some(Value::Native(NativeFn::ObjectKeys)),
            ("console" | "Math" | "JSON" | "Object", other) => {
                return Err(Exception::fault(format!(
                    "{namespace}.{other} is not a function"
                )));
            }
            _ => None,
        };
        Ok(value)
    }

    fn member_value(&mut self, object: &Value, property: &str) -> Result<Value, Exception> {
        match object {
            Value::Undefined | Value::Null => Err(Exception::fault(format!(
                "Cannot read properties of {} (reading '{property}')",
                object.to_display_string()
            ))),
            Value::Str(s) if property == "length" => {
                Ok(Value::Number(s.chars().count() as f64))
            }
            Value::Array(items) if property == "length" => {
                Ok(Value::Number(items.borrow().len() as f64))
            }
            Value::Object(entries) => Ok(entries
                .borrow()
                .iter()
                .find(|(key, _)| key == property)
                .map(|(_, value)| value.clone())
                .unwrap_or(Value::Undefined)),
            Value::Error(err) => Ok(match property {
                "message" => Value::Str(err.message.clone()),
                "name" => Value::Str(err.name.clone()),
                _ => Value::Undefined,
            }),
            _ => Ok(Value::Undefined),
        }
    }

    fn index_value(&mut self, object: &Value, index: &Value) -> Result<Value, Exception> {
        match object {
            Value::Undefined | Value::Null => Err(Exception::fault(format!(
                "Cannot read properties of {} (reading '{}')",
                object.to_display_string(),
                index.to_display_string()
            ))),
            Value::Array(items) => {
                let idx = index.to_number();
                if idx.fract() != 0.0 || idx < 0.0 {
                    return Ok(Value::Undefined);
                }
                Ok(items
                    .borrow()
                    .get(idx as usize)
                    .cloned()
                    .unwrap_or(Value::Undefined))
            }
            Value::Str(s) => {
                let idx = index.to_number();
                if idx.fract() != 0.0 || idx < 0.0 {
                    return Ok(Value::Undefined);
                }
                Ok(s.chars()
                    .nth(idx as usize)
                    .map(|ch| Value::Str(ch.to_string()))
                    .unwrap_or(Value::Undefined))
            }
            Value::Object(_) => self.member_value(object, &index.to_display_string()),
            _ => Ok(Value::Undefined),
        }
    }

    fn eval_call(&mut self, env: &Env, callee: &Expr, args: &[Expr]) -> Result<Value, Exception> {
        // Method-style calls dispatch on the receiver.
        if let Expr::Member { object, property } = callee {
            if let Some(value) = self.builtin_namespace_member(env, object, property)? {
                let argv = self.eval_args(env, args)?;
                return match value {
                    Value::Native(native) => self.call_native(native, argv),
                    other => Err(Exception::fault(format!(
                        "{} is not a function",
                        other.to_display_string()
                    ))),
                };
            }
            let receiver = self.eval(env, object)?;
            let argv = self.eval_args(env, args)?;
            return self.call_method(&receiver, property, argv);
        }

        let callee_value = self.eval(env, callee)?;
        let argv = self.eval_args(env, args)?;
        let name = match callee {
            Expr::Ident(name) => name.as_str(),
            _ => "expression",
        };
        self.call_value(&callee_value, argv, name)
    }

    fn eval_args(&mut self, env: &Env, args: &[Expr]) -> Result<Vec<Value>, Exception> {
        let mut argv = Vec::with_capacity(args.len());
        for arg in args {
            argv.push(self.eval(env, arg)?);
        }
        Ok(argv)
    }

    fn call_value(
        &mut self,
        callee: &Value,
        argv: Vec<Value>,
        name: &str,
    ) -> Result<Value, Exception> {
        match callee {
            Value::Function(function) => self.call_function(function, argv),
            Value::Native(native) => self.call_native(*native, argv),
            _ => Err(Exception::fault(format!("{name} is not a function"))),
        }
    }

    fn call_method(
        &mut self,
        receiver: &Value,
        method: &str,
        argv: Vec<Value>,
    ) -> Result<Value, Exception> {
        match (receiver, method) {
            (Value::Array(items), "push") => {
                items.borrow_mut().extend(argv);
                Ok(Value::Number(items.borrow().len() as f64))
            }
            (Value::Array(items), "join") => {
                let separator = argv
                    .first()
                    .map(|sep| sep.to_display_string())
                    .unwrap_or_else(|| ",".into());
                let joined = items
                    .borrow()
                    .iter()
                    .map(|item| match item {
                        Value::Undefined | Value::Null => String::new(),
                        other => other.to_display_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(&separator);
                Ok(Value::Str(joined))
            }
            (Value::Array(items), "map") => {
                let callback = argv
                    .into_iter()
                    .next()
                    .unwrap_or(Value::Undefined);
                let snapshot: Vec<Value> = items.borrow().clone();
                let mut out = Vec::with_capacity(snapshot.len());
                for (index, item) in snapshot.into_iter().enumerate() {
                    out.push(self.call_value(
                        &callback,
                        vec![item, Value::Number(index as f64)],
                        "callback",
                    )?);
                }
                Ok(Value::array(out))
            }
            (Value::Array(items), "forEach") => {
                let callback = argv
                    .into_iter()
                    .next()
                    .unwrap_or(Value::Undefined);
                let snapshot: Vec<Value> = items.borrow().clone();
                for (index, item) in snapshot.into_iter().enumerate() {
                    self.call_value(
                        &callback,
                        vec![item, Value::Number(index as f64)],
                        "callback",
                    )?;
                }
                Ok(Value::Undefined)
            }
            (Value::Str(s), "toUpperCase") => Ok(Value::Str(s.to_uppercase())),
            (Value::Str(s), "toLowerCase") => Ok(Value::Str(s.to_lowercase())),
            (Value::Object(_), _) => {
                let member = self.member_value(receiver, method)?;
                self.call_value(&member, argv, method)
            }
            (Value::Undefined | Value::Null, _) => Err(Exception::fault(format!(
                "Cannot read properties of {} (reading '{method}')",
                receiver.to_display_string()
            ))),
            _ => Err(Exception::fault(format!("{method} is not a function"))),
        }
    }

    fn call_function(
        &mut self,
        function: &Rc<Function>,
        argv: Vec<Value>,
    ) -> Result<Value, Exception> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(Exception::fault("Maximum call stack size exceeded"));
        }
        self.depth += 1;
        let scope = Scope::child(&function.env);
        for (index, param) in function.params.iter().enumerate() {
            let value = argv.get(index).cloned().unwrap_or(Value::Undefined);
            Scope::declare(&scope, param, value);
        }

        let result = match &function.body {
            ArrowBody::Expr(expr) => self.eval(&scope, expr),
            ArrowBody::Block(stmts) => self.exec_stmts(&scope, stmts).map(|flow| match flow {
                Flow::Return(value) => value,
                _ => Value::Undefined,
            }),
        };
        self.depth -= 1;
        result
    }

    fn call_native(&mut self, native: NativeFn, argv: Vec<Value>) -> Result<Value, Exception> {
        let number_arg = |index: usize| argv.get(index).map(Value::to_number).unwrap_or(f64::NAN);

        match native {
            NativeFn::ConsoleLog => {
                let line = format_log_args(&argv)?;
                (self.sink)(&line);
                Ok(Value::Undefined)
            }
            NativeFn::MathFloor => Ok(Value::Number(number_arg(0).floor())),
            NativeFn::MathCeil => Ok(Value::Number(number_arg(0).ceil())),
            NativeFn::MathRound => Ok(Value::Number(number_arg(0).round())),
            NativeFn::MathAbs => Ok(Value::Number(number_arg(0).abs())),
            NativeFn::MathSqrt => Ok(Value::Number(number_arg(0).sqrt())),
            NativeFn::MathPow => Ok(Value::Number(number_arg(0).powf(number_arg(1)))),
            NativeFn::MathRandom => Ok(Value::Number(rand::random::<f64>())),
            NativeFn::MathMin => Ok(Value::Number(
                argv.iter()
                    .map(Value::to_number)
                    .fold(f64::INFINITY, f64::min),
            )),
            NativeFn::MathMax => Ok(Value::Number(
                argv.iter()
                    .map(Value::to_number)
                    .fold(f64::NEG_INFINITY, f64::max),
            )),
            NativeFn::JsonStringify => {
                let value = argv.first().cloned().unwrap_or(Value::Undefined);
                let mut seen = Vec::new();
                let Some(json) = to_json(&value, &mut seen)? else {
                    return Ok(Value::Undefined);
                };
                // Three-argument form selects indented output.
                let indented = argv.len() >= 3 && argv[2].to_number() > 0.0;
                let text = if indented {
                    serde_json::to_string_pretty(&json)
                } else {
                    serde_json::to_string(&json)
                }
                .map_err(|err| Exception::fault(err.to_string()))?;
                Ok(Value::Str(text))
            }
            NativeFn::ObjectKeys => {
                let value = argv.first().cloned().unwrap_or(Value::Undefined);
                match value {
                    Value::Object(entries) => Ok(Value::array(
                        entries
                            .borrow()
                            .iter()
                            .map(|(key, _)| Value::Str(key.clone()))
                            .collect(),
                    )),
                    Value::Array(items) => Ok(Value::array(
                        (0..items.borrow().len())
                            .map(|index| Value::Str(index.to_string()))
                            .collect(),
                    )),
                    Value::Undefined | Value::Null => Err(Exception::fault(
                        "Cannot convert undefined or null to object",
                    )),
                    _ => Ok(Value::array(Vec::new())),
                }
            }
        }
    }

    fn write_target(&mut self, env: &Env, target: &Expr, value: Value) -> Result<(), Exception> {
        match target {
            Expr::Ident(name) => {
                Scope::assign(env, name, value);
                Ok(())
            }
            Expr::Member { object, property } => {
                let object = self.eval(env, object)?;
                self.set_property(&object, property, value)
            }
            Expr::Index { object, index } => {
                let object = self.eval(env, object)?;
                let index = self.eval(env, index)?;
                match &object {
                    Value::Array(items) => {
                        let idx = index.to_number();
                        if idx.fract() == 0.0 && idx >= 0.0 {
                            let idx = idx as usize;
                            let mut items = items.borrow_mut();
                            if idx >= items.len() {
                                items.resize(idx + 1, Value::Undefined);
                            }
                            items[idx] = value;
                        }
                        Ok(())
                    }
                    _ => self.set_property(&object, &index.to_display_string(), value),
                }
            }
            _ => Err(Exception::fault("Invalid assignment target")),
        }
    }

    fn set_property(
        &mut self,
        object: &Value,
        property: &str,
        value: Value,
    ) -> Result<(), Exception> {
        match object {
            Value::Object(entries) => {
                let mut entries = entries.borrow_mut();
                if let Some(entry) = entries.iter_mut().find(|(key, _)| key == property) {
                    entry.1 = value;
                } else {
                    entries.push((property.to_string(), value));
                }
                Ok(())
            }
            Value::Undefined | Value::Null => Err(Exception::fault(format!(
                "Cannot set properties of {} (setting '{property}')",
                object.to_display_string()
            ))),
            // Writes to primitives are silently dropped, as in sloppy mode.
            _ => Ok(()),
        }
    }
}

fn binary_op(op: BinaryOp, left: &Value, right: &Value) -> Value {
    match op {
        BinaryOp::Add => {
            if let (Value::Number(a), Value::Number(b)) = (left, right) {
                return Value::Number(a + b);
            }
            let stringy = |value: &Value| {
                matches!(
                    value,
                    Value::Str(_) | Value::Array(_) | Value::Object(_) | Value::Error(_)
                )
            };
            if stringy(left) || stringy(right) {
                Value::Str(format!(
                    "{}{}",
                    left.to_display_string(),
                    right.to_display_string()
                ))
            } else {
                Value::Number(left.to_number() + right.to_number())
            }
        }
        BinaryOp::Sub => Value::Number(left.to_number() - right.to_number()),
        BinaryOp::Mul => Value::Number(left.to_number() * right.to_number()),
        BinaryOp::Div => Value::Number(left.to_number() / right.to_number()),
        BinaryOp::Rem => Value::Number(left.to_number() % right.to_number()),
        BinaryOp::Eq => Value::Bool(left.strict_equals(right)),
        BinaryOp::NotEq => Value::Bool(!left.strict_equals(right)),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let result = if let (Value::Str(a), Value::Str(b)) = (left, right) {
                match op {
                    BinaryOp::Lt => a < b,
                    BinaryOp::Le => a <= b,
                    BinaryOp::Gt => a > b,
                    _ => a >= b,
                }
            } else {
                let (a, b) = (left.to_number(), right.to_number());
                match op {
                    BinaryOp::Lt => a < b,
                    BinaryOp::Le => a <= b,
                    BinaryOp::Gt => a > b,
                    _ => a >= b,
                }
            };
            Value::Bool(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse;
    use super::*;

    fn run_collect(source: &str) -> Result<Vec<String>, Exception> {
        let program = parse(source).expect("test source parses");
        let mut lines = Vec::new();
        run_program(&program, &mut |line| lines.push(line.to_string()))?;
        Ok(lines)
    }

    #[test]
    fn logs_a_plain_string() {
        assert_eq!(run_collect("console.log(\"hi\")").unwrap(), vec!["hi"]);
    }

    #[test]
    fn arithmetic_and_string_concat() {
        let lines = run_collect("console.log(1 + 2 * 3); console.log('n=' + 4)").unwrap();
        assert_eq!(lines, vec!["7", "n=4"]);
    }

    #[test]
    fn closures_capture_their_environment() {
        let lines = run_collect(
            "function counter() { let n = 0; return () => { n++; return n } }\n\
             const next = counter()\n\
             next(); console.log(next())",
        )
        .unwrap();
        assert_eq!(lines, vec!["2"]);
    }

    #[test]
    fn loops_with_break_and_continue() {
        let lines = run_collect(
            "let out = []\n\
             for (let i = 0; i < 10; i++) {\n\
               if (i % 2 === 0) continue\n\
               if (i > 6) break\n\
               out.push(i)\n\
             }\n\
             console.log(out.join('-'))",
        )
        .unwrap();
        assert_eq!(lines, vec!["1-3-5"]);
    }

    #[test]
    fn array_map_uses_callbacks() {
        let lines = run_collect("console.log([1, 2, 3].map(n => n * n).join(','))").unwrap();
        assert_eq!(lines, vec!["1,4,9"]);
    }

    #[test]
    fn thrown_errors_carry_their_message() {
        let err = run_collect("throw new Error('boom')").unwrap_err();
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn try_catch_recovers_and_binds() {
        let lines = run_collect(
            "try { missing() } catch (e) { console.log('caught', e.message) }",
        )
        .unwrap();
        assert_eq!(lines, vec!["caught missing is not defined"]);
    }

    #[test]
    fn undefined_variable_is_a_reference_fault() {
        let err = run_collect("console.log(nope)").unwrap_err();
        assert_eq!(err.message(), "nope is not defined");
    }

    #[test]
    fn runaway_recursion_is_reported_not_fatal() {
        let err = run_collect("function f() { return f() } f()").unwrap_err();
        assert_eq!(err.message(), "Maximum call stack size exceeded");
    }

    #[test]
    fn object_members_read_and_write() {
        let lines = run_collect(
            "let user = { name: 'Ada' }\n\
             user.age = 36\n\
             user['name'] = 'Grace'\n\
             console.log(user.name, user.age)",
        )
        .unwrap();
        assert_eq!(lines, vec!["Grace 36"]);
    }

    #[test]
    fn math_and_json_builtins() {
        let lines = run_collect(
            "console.log(Math.max(1, 9, 4))\n\
             console.log(JSON.stringify({ a: 1 }))\n\
             console.log(Object.keys({ a: 1, b: 2 }).join())",
        )
        .unwrap();
        assert_eq!(lines, vec!["9", "{\"a\":1}", "a,b"]);
    }

    #[test]
    fn assignment_to_undeclared_name_lands_in_root_scope() {
        // Sloppy-mode behavior preserved from the original runner.
        let lines = run_collect("function f() { leak = 5 } f(); console.log(leak)").unwrap();
        assert_eq!(lines, vec!["5"]);
    }

    #[test]
    fn nullish_and_ternary() {
        let lines = run_collect(
            "let a = null\n\
             console.log(a ?? 'fallback')\n\
             console.log(1 < 2 ? 'yes' : 'no')",
        )
        .unwrap();
        assert_eq!(lines, vec!["fallback", "yes"]);
    }
}
