//! Recursive-descent parser for C# declarations.
//!
//! Only the declaration skeleton is built: namespaces, usings, types and
//! their members. Bodies, accessor bodies and non-constant initializers are
//! skipped by balanced-delimiter scanning, so statement syntax never has to be
//! understood.
use super::lexer::{Tok, Token};
use super::syntax::*;
use crate::error::SyntaxError;

type PResult<T> = Result<T, SyntaxError>;

const PARAMETER_MODIFIERS: &[&str] = &["this", "ref", "out", "in", "params", "scoped", "readonly"];

pub fn parse(mut tokens: Vec<Token>) -> PResult<CompilationUnit> {
    if tokens.last().is_none_or(|t| t.tok != Tok::Eof) {
        let line = tokens.last().map_or(1, |t| t.line);
        tokens.push(Token { tok: Tok::Eof, line });
    }
    Parser { tokens, pos: 0 }.unit()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

// ————————————————————————————————————————————————————————————————————————————
// CURSOR
// ————————————————————————————————————————————————————————————————————————————

impl Parser {
    fn last(&self) -> usize {
        self.tokens.len() - 1
    }

    fn peek(&self) -> &Tok {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> &Tok {
        &self.tokens[(self.pos + n).min(self.last())].tok
    }

    fn line(&self) -> u32 {
        self.tokens[self.pos.min(self.last())].line
    }

    fn bump(&mut self) -> Tok {
        let tok = self.peek().clone();
        if self.pos < self.last() {
            self.pos += 1;
        }
        tok
    }

    fn is_punct(&self, c: char) -> bool {
        *self.peek() == Tok::Punct(c)
    }

    fn is_punct_at(&self, n: usize, c: char) -> bool {
        *self.peek_at(n) == Tok::Punct(c)
    }

    fn eat_punct(&mut self, c: char) -> bool {
        let hit = self.is_punct(c);
        if hit {
            self.bump();
        }
        hit
    }

    fn expect_punct(&mut self, c: char, expected: &'static str) -> PResult<()> {
        if self.eat_punct(c) { Ok(()) } else { Err(self.expected(expected)) }
    }

    fn is_kw(&self, kw: &str) -> bool {
        self.is_kw_at(0, kw)
    }

    fn is_kw_at(&self, n: usize, kw: &str) -> bool {
        matches!(self.peek_at(n), Tok::Ident(s) if s == kw)
    }

    fn eat_kw(&mut self, kw: &str) -> bool {
        let hit = self.is_kw(kw);
        if hit {
            self.bump();
        }
        hit
    }

    fn is_ident_at(&self, n: usize) -> bool {
        matches!(self.peek_at(n), Tok::Ident(_) | Tok::VerbatimIdent(_))
    }

    fn ident(&mut self, expected: &'static str) -> PResult<String> {
        match self.peek() {
            Tok::Ident(s) | Tok::VerbatimIdent(s) => {
                let s = s.clone();
                self.bump();
                Ok(s)
            }
            _ => Err(self.expected(expected)),
        }
    }

    fn expected(&self, expected: &'static str) -> SyntaxError {
        SyntaxError::Expected { expected, found: self.peek().describe(), line: self.line() }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// SKIPPING
// ————————————————————————————————————————————————————————————————————————————

impl Parser {
    /// At `open`; consumes through the matching `close`.
    fn skip_balanced(&mut self, open: char, close: char) -> PResult<()> {
        let line = self.line();
        let mut depth = 0usize;
        loop {
            match self.bump() {
                Tok::Eof => return Err(SyntaxError::Unbalanced { delim: open, line }),
                Tok::Punct(c) if c == open => depth += 1,
                Tok::Punct(c) if c == close => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }

    /// Skips the rest of a member or statement: through a `;` at depth zero,
    /// or through a brace block that is not followed by an initializer.
    fn skip_member_rest(&mut self) -> PResult<()> {
        loop {
            match self.peek() {
                Tok::Eof => return Err(self.expected("`;` or `}`")),
                Tok::Punct(';') => {
                    self.bump();
                    return Ok(());
                }
                Tok::Punct('{') => {
                    self.skip_balanced('{', '}')?;
                    if self.is_punct('=') {
                        continue;
                    }
                    self.eat_punct(';');
                    return Ok(());
                }
                Tok::Punct('(') => self.skip_balanced('(', ')')?,
                Tok::Punct('[') => self.skip_balanced('[', ']')?,
                Tok::Punct(c @ (')' | ']' | '}')) => {
                    return Err(SyntaxError::Unbalanced { delim: *c, line: self.line() });
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Collects tokens up to (not including) a depth-zero token matching `stop`.
    fn scan_until(&mut self, stop: impl Fn(&Tok) -> bool) -> PResult<Vec<Tok>> {
        let mut out = Vec::new();
        let mut depth = 0usize;
        loop {
            let tok = self.peek().clone();
            if depth == 0 && stop(&tok) {
                return Ok(out);
            }
            match tok {
                Tok::Eof => return Err(self.expected("end of expression")),
                Tok::Punct('(' | '[' | '{') => depth += 1,
                Tok::Punct(c @ (')' | ']' | '}')) => {
                    if depth == 0 {
                        return Err(SyntaxError::Unbalanced { delim: c, line: self.line() });
                    }
                    depth -= 1;
                }
                _ => {}
            }
            out.push(tok);
            self.bump();
        }
    }

    fn skip_constraints(&mut self) {
        while self.eat_kw("where") {
            loop {
                match self.peek() {
                    Tok::Punct('{' | ';') | Tok::Arrow | Tok::Eof => return,
                    Tok::Ident(s) if s == "where" => break,
                    _ => {
                        self.bump();
                    }
                }
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// COMPILATION UNITS
// ————————————————————————————————————————————————————————————————————————————

impl Parser {
    fn unit(mut self) -> PResult<CompilationUnit> {
        let usings = self.usings()?;
        let items = self.items(false)?;
        Ok(CompilationUnit { usings, items })
    }

    fn is_using_directive(&self) -> bool {
        let at = usize::from(self.is_kw("global"));
        self.is_kw_at(at, "using") && !self.is_punct_at(at + 1, '(') && !self.is_kw_at(at + 1, "var")
    }

    fn usings(&mut self) -> PResult<Vec<UsingDirective>> {
        let mut out = Vec::new();
        while self.is_using_directive() {
            out.push(self.using_directive()?);
        }
        Ok(out)
    }

    fn using_directive(&mut self) -> PResult<UsingDirective> {
        let global = self.eat_kw("global");
        self.bump();
        let directive = if self.eat_kw("static") {
            UsingDirective::Static { target: self.type_syntax()?, global }
        } else if self.is_ident_at(0) && self.is_punct_at(1, '=') {
            let alias = self.ident("alias name")?;
            self.bump();
            UsingDirective::Alias { alias, target: self.type_syntax()?, global }
        } else {
            UsingDirective::Namespace { name: self.qualified_name()?, global }
        };
        self.expect_punct(';', "`;`")?;
        Ok(directive)
    }

    fn qualified_name(&mut self) -> PResult<String> {
        if self.is_kw("global") && *self.peek_at(1) == Tok::ColonColon {
            self.bump();
            self.bump();
        }
        let mut name = self.ident("name")?;
        while self.is_punct('.') || *self.peek() == Tok::ColonColon {
            self.bump();
            name.push('.');
            name.push_str(&self.ident("name")?);
        }
        Ok(name)
    }

    fn items(&mut self, in_block: bool) -> PResult<Vec<Item>> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                Tok::Eof if in_block => return Err(self.expected("`}`")),
                Tok::Eof => return Ok(items),
                Tok::Punct('}') if in_block => return Ok(items),
                Tok::Punct('}') => return Err(SyntaxError::Unbalanced { delim: '}', line: self.line() }),
                Tok::Punct(';') => {
                    self.bump();
                    continue;
                }
                _ => {}
            }
            if self.eat_kw("namespace") {
                items.push(Item::Namespace(self.namespace()?));
                continue;
            }
            if self.is_kw("extern") && self.is_kw_at(1, "alias") {
                self.skip_member_rest()?;
                continue;
            }
            if self.is_using_directive() {
                // misplaced using; it has no namespace to apply to
                self.using_directive()?;
                continue;
            }
            let attributes = self.attributes()?;
            let modifiers = self.modifiers();
            if let Some(kind) = self.decl_kind() {
                items.push(Item::Type(self.type_decl(kind, attributes, modifiers)?));
            } else if !(self.is_punct('}') || *self.peek() == Tok::Eof) {
                // delegates and top-level statements
                self.skip_member_rest()?;
            }
        }
    }

    fn namespace(&mut self) -> PResult<NamespaceDecl> {
        let name = self.qualified_name()?;
        if self.eat_punct(';') {
            let usings = self.usings()?;
            let items = self.items(false)?;
            return Ok(NamespaceDecl { name, usings, items });
        }
        self.expect_punct('{', "`{` or `;`")?;
        let usings = self.usings()?;
        let items = self.items(true)?;
        self.expect_punct('}', "`}`")?;
        Ok(NamespaceDecl { name, usings, items })
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

impl Parser {
    fn modifiers(&mut self) -> Modifiers {
        let mut out = Vec::new();
        while let Tok::Ident(s) = self.peek() {
            if !MODIFIER_KEYWORDS.contains(&s.as_str()) {
                break;
            }
            out.push(s.clone());
            self.bump();
        }
        Modifiers(out)
    }

    fn decl_kind(&mut self) -> Option<DeclKind> {
        let kind = match self.peek() {
            Tok::Ident(s) => match s.as_str() {
                "class" => DeclKind::Class,
                "struct" => DeclKind::Struct,
                "interface" => DeclKind::Interface,
                "enum" => DeclKind::Enum,
                "record" if self.is_kw_at(1, "struct") => DeclKind::RecordStruct,
                "record" if self.is_ident_at(1) => DeclKind::RecordClass,
                _ => return None,
            },
            _ => return None,
        };
        self.bump();
        if matches!(kind, DeclKind::RecordClass | DeclKind::RecordStruct) {
            let _ = self.eat_kw("class") || self.eat_kw("struct");
        }
        Some(kind)
    }

    fn type_decl(&mut self, kind: DeclKind, attributes: Vec<Attribute>, modifiers: Modifiers) -> PResult<TypeDecl> {
        let line = self.line();
        let name = self.ident("type name")?;
        let type_params = self.type_params()?;
        let parameters = if self.is_punct('(') { self.parameters()? } else { Vec::new() };
        let mut bases = Vec::new();
        if self.eat_punct(':') {
            loop {
                bases.push(self.type_syntax()?);
                if self.is_punct('(') {
                    self.skip_balanced('(', ')')?;
                }
                if !self.eat_punct(',') {
                    break;
                }
            }
        }
        self.skip_constraints();
        let mut members = Vec::new();
        if self.is_punct('{') {
            if kind == DeclKind::Enum {
                self.skip_balanced('{', '}')?;
            } else {
                self.bump();
                members = self.members(&name)?;
                self.expect_punct('}', "`}`")?;
            }
            self.eat_punct(';');
        } else {
            self.expect_punct(';', "`{` or `;`")?;
        }
        Ok(TypeDecl { kind, name, type_params, attributes, modifiers, parameters, bases, members, line })
    }

    fn type_params(&mut self) -> PResult<Vec<String>> {
        let mut out = Vec::new();
        if !self.eat_punct('<') {
            return Ok(out);
        }
        loop {
            self.attributes()?;
            let _ = self.eat_kw("in") || self.eat_kw("out");
            out.push(self.ident("type parameter")?);
            if self.eat_punct(',') {
                continue;
            }
            self.expect_punct('>', "`>`")?;
            return Ok(out);
        }
    }

    fn parameters(&mut self) -> PResult<Vec<Parameter>> {
        self.expect_punct('(', "`(`")?;
        let mut params = Vec::new();
        if self.eat_punct(')') {
            return Ok(params);
        }
        loop {
            self.attributes()?;
            let mut modifiers = Vec::new();
            while let Tok::Ident(s) = self.peek() {
                if !PARAMETER_MODIFIERS.contains(&s.as_str()) {
                    break;
                }
                modifiers.push(s.clone());
                self.bump();
            }
            if !self.eat_kw("__arglist") {
                let ty = self.type_syntax()?;
                let name = self.ident("parameter name")?;
                if self.eat_punct('=') {
                    self.scan_until(|t| matches!(t, Tok::Punct(',' | ')')))?;
                }
                params.push(Parameter { name, ty, modifiers: Modifiers(modifiers) });
            }
            if self.eat_punct(',') {
                continue;
            }
            self.expect_punct(')', "`,` or `)`")?;
            return Ok(params);
        }
    }

    fn attributes(&mut self) -> PResult<Vec<Attribute>> {
        let mut out = Vec::new();
        while self.eat_punct('[') {
            if self.is_ident_at(0) && self.is_punct_at(1, ':') {
                self.bump();
                self.bump();
            }
            loop {
                let name = self.qualified_name()?;
                if self.is_punct('<') {
                    self.type_args()?;
                }
                let args = if self.is_punct('(') { self.attribute_args()? } else { Vec::new() };
                out.push(Attribute { name, args });
                if self.eat_punct(',') && !self.is_punct(']') {
                    continue;
                }
                break;
            }
            self.expect_punct(']', "`]`")?;
        }
        Ok(out)
    }

    fn attribute_args(&mut self) -> PResult<Vec<AttributeArg>> {
        self.bump();
        let mut args = Vec::new();
        if self.eat_punct(')') {
            return Ok(args);
        }
        loop {
            let tokens = self.scan_until(|t| matches!(t, Tok::Punct(',' | ')')))?;
            let (name, value) = match tokens.as_slice() {
                [Tok::Ident(n), Tok::Punct('='), rest @ ..] if rest.first() != Some(&Tok::Punct('=')) => {
                    (Some(n.clone()), rest)
                }
                [Tok::Ident(n), Tok::Punct(':'), rest @ ..] => (Some(n.clone()), rest),
                all => (None, all),
            };
            args.push(AttributeArg { name, value: const_expr(value) });
            if self.eat_punct(',') {
                continue;
            }
            self.expect_punct(')', "`)`")?;
            return Ok(args);
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// MEMBERS
// ————————————————————————————————————————————————————————————————————————————

impl Parser {
    fn members(&mut self, type_name: &str) -> PResult<Vec<Member>> {
        let mut members = Vec::new();
        while !self.is_punct('}') {
            if *self.peek() == Tok::Eof {
                return Err(self.expected("`}`"));
            }
            if self.eat_punct(';') {
                continue;
            }
            if let Some(member) = self.member(type_name)? {
                members.push(member);
            }
        }
        Ok(members)
    }

    fn member(&mut self, type_name: &str) -> PResult<Option<Member>> {
        let attributes = self.attributes()?;
        let modifiers = self.modifiers();
        if let Some(kind) = self.decl_kind() {
            return Ok(Some(Member::Type(self.type_decl(kind, attributes, modifiers)?)));
        }
        let constructor = matches!(self.peek(), Tok::Ident(s) | Tok::VerbatimIdent(s) if s == type_name)
            && self.is_punct_at(1, '(');
        let skipped = constructor
            || self.is_punct('~')
            || ["delegate", "event", "implicit", "explicit"].iter().any(|kw| self.is_kw(kw));
        if skipped {
            self.skip_member_rest()?;
            return Ok(None);
        }

        let line = self.line();
        let ty = self.type_syntax()?;
        if self.is_kw("operator") || self.is_kw("this") {
            self.skip_member_rest()?;
            return Ok(None);
        }
        let (explicit_interface, name, type_params) = self.member_name()?;
        let member = match self.peek() {
            Tok::Punct('(') => {
                let parameters = self.parameters()?;
                self.skip_constraints();
                match self.peek() {
                    Tok::Punct(';') => {
                        self.bump();
                    }
                    Tok::Punct('{') => self.skip_balanced('{', '}')?,
                    Tok::Arrow => self.skip_member_rest()?,
                    _ => return Err(self.expected("method body")),
                }
                Member::Method(MethodDecl {
                    name,
                    type_params,
                    attributes,
                    modifiers,
                    return_type: ty,
                    parameters,
                    line,
                })
            }
            Tok::Punct('{') => {
                let (getter, setter) = self.accessors()?;
                if self.eat_punct('=') {
                    self.skip_member_rest()?;
                }
                Member::Property(PropertyDecl { name, ty, modifiers, attributes, getter, setter, explicit_interface })
            }
            Tok::Arrow => {
                self.skip_member_rest()?;
                let getter = Some(Accessor { modifiers: Modifiers::default() });
                Member::Property(PropertyDecl { name, ty, modifiers, attributes, getter, setter: None, explicit_interface })
            }
            Tok::Punct('=' | ',' | ';') => Member::Field(FieldDecl { ty, modifiers, declarators: self.declarators(name)? }),
            Tok::Punct('[') => {
                self.skip_member_rest()?;
                return Ok(None);
            }
            _ => return Err(self.expected("member declaration")),
        };
        Ok(Some(member))
    }

    /// Member name with an optional explicit-interface qualifier, plus method
    /// type parameters when present.
    fn member_name(&mut self) -> PResult<(Option<TypeSyntax>, String, Vec<String>)> {
        let mut segments = Vec::new();
        let mut name = self.ident("member name")?;
        let mut type_params = Vec::new();
        loop {
            if self.eat_punct('.') {
                segments.push(NameSegment { name, args: Vec::new() });
                name = self.ident("member name")?;
                continue;
            }
            if self.is_punct('<') {
                let save = self.pos;
                match self.type_args() {
                    Ok(args) if self.is_punct('.') => {
                        self.bump();
                        segments.push(NameSegment { name, args });
                        name = self.ident("member name")?;
                        continue;
                    }
                    _ => {
                        self.pos = save;
                        type_params = self.type_params()?;
                    }
                }
            }
            break;
        }
        let explicit_interface = (!segments.is_empty()).then(|| TypeSyntax::Named { global: false, segments });
        Ok((explicit_interface, name, type_params))
    }

    fn accessors(&mut self) -> PResult<(Option<Accessor>, Option<Accessor>)> {
        self.bump();
        let (mut getter, mut setter) = (None, None);
        while !self.eat_punct('}') {
            if *self.peek() == Tok::Eof {
                return Err(self.expected("`}`"));
            }
            self.attributes()?;
            let modifiers = self.modifiers();
            let kind = self.ident("accessor")?;
            match self.peek() {
                Tok::Punct(';') => {
                    self.bump();
                }
                Tok::Punct('{') => self.skip_balanced('{', '}')?,
                Tok::Arrow => self.skip_member_rest()?,
                _ => return Err(self.expected("accessor body")),
            }
            match kind.as_str() {
                "get" => getter = Some(Accessor { modifiers }),
                "set" | "init" => setter = Some(Accessor { modifiers }),
                _ => {}
            }
        }
        Ok((getter, setter))
    }

    fn declarators(&mut self, first: String) -> PResult<Vec<Declarator>> {
        let mut out = Vec::new();
        let mut name = first;
        loop {
            let initializer = if self.eat_punct('=') { Some(self.initializer()?) } else { None };
            out.push(Declarator { name, initializer });
            if self.eat_punct(',') {
                name = self.ident("field name")?;
                continue;
            }
            self.expect_punct(';', "`;`")?;
            return Ok(out);
        }
    }

    /// A field initializer ends at `;`, or at a `,` that starts another
    /// declarator (`, name =`, `, name,`, `, name;`).
    fn initializer(&mut self) -> PResult<ConstExpr> {
        let mut tokens = Vec::new();
        loop {
            tokens.extend(self.scan_until(|t| matches!(t, Tok::Punct(',' | ';')))?);
            let next_declarator = self.is_punct(',')
                && self.is_ident_at(1)
                && matches!(self.peek_at(2), Tok::Punct('=' | ',' | ';'));
            if self.is_punct(';') || next_declarator {
                return Ok(const_expr(&tokens));
            }
            tokens.push(self.bump());
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPE SYNTAX
// ————————————————————————————————————————————————————————————————————————————

impl Parser {
    fn type_syntax(&mut self) -> PResult<TypeSyntax> {
        let predefined = match self.peek() {
            Tok::Ident(k) if PREDEFINED_TYPES.contains(&k.as_str()) => Some(k.clone()),
            _ => None,
        };
        let mut ty = if let Some(keyword) = predefined {
            self.bump();
            TypeSyntax::Predefined(keyword)
        } else if self.eat_punct('(') {
            let mut elems = Vec::new();
            loop {
                elems.push(self.type_syntax()?);
                if self.is_ident_at(0) {
                    self.bump();
                }
                if self.eat_punct(',') {
                    continue;
                }
                self.expect_punct(')', "`)`")?;
                break;
            }
            TypeSyntax::Tuple(elems)
        } else {
            self.named_type()?
        };
        loop {
            if self.eat_punct('?') {
                ty = TypeSyntax::Nullable(Box::new(ty));
            } else if self.is_punct('[') && matches!(self.peek_at(1), Tok::Punct(']' | ',')) {
                self.bump();
                let mut rank = 1;
                while self.eat_punct(',') {
                    rank += 1;
                }
                self.expect_punct(']', "`]`")?;
                ty = TypeSyntax::Array { element: Box::new(ty), rank };
            } else if self.eat_punct('*') {
                ty = TypeSyntax::Pointer(Box::new(ty));
            } else {
                return Ok(ty);
            }
        }
    }

    fn named_type(&mut self) -> PResult<TypeSyntax> {
        let global = self.is_kw("global") && *self.peek_at(1) == Tok::ColonColon;
        if global {
            self.bump();
            self.bump();
        }
        let mut segments = Vec::new();
        loop {
            let name = self.ident("type")?;
            let args = if self.is_punct('<') { self.type_args()? } else { Vec::new() };
            segments.push(NameSegment { name, args });
            let qualified = (self.is_punct('.') || *self.peek() == Tok::ColonColon) && self.is_ident_at(1);
            if !qualified {
                return Ok(TypeSyntax::Named { global, segments });
            }
            self.bump();
        }
    }

    fn type_args(&mut self) -> PResult<Vec<TypeSyntax>> {
        self.expect_punct('<', "`<`")?;
        let mut args = Vec::new();
        loop {
            if self.eat_punct('>') {
                return Ok(args);
            }
            if self.eat_punct(',') {
                continue;
            }
            args.push(self.type_syntax()?);
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONSTANT EXPRESSIONS
// ————————————————————————————————————————————————————————————————————————————

/// Reads the string-constant shapes out of an expression's tokens.
pub fn const_expr(tokens: &[Tok]) -> ConstExpr {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::Punct('(' | '[' | '{') => depth += 1,
            Tok::Punct(')' | ']' | '}') => depth = depth.saturating_sub(1),
            Tok::Punct('+') if depth == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    let mut terms = parts.into_iter().map(const_term);
    let first = terms.next().unwrap_or(ConstExpr::Other);
    terms.fold(first, |acc, term| ConstExpr::Concat(Box::new(acc), Box::new(term)))
}

fn const_term(tokens: &[Tok]) -> ConstExpr {
    match tokens {
        [Tok::Str(s)] => ConstExpr::Str(s.clone()),
        [Tok::Ident(f), Tok::Punct('('), inner @ .., Tok::Punct(')')] if f == "nameof" => {
            dotted(inner).map_or(ConstExpr::Other, ConstExpr::NameOf)
        }
        [Tok::Punct('('), inner @ .., Tok::Punct(')')] => const_expr(inner),
        _ => dotted(tokens).map_or(ConstExpr::Other, ConstExpr::Name),
    }
}

fn dotted(tokens: &[Tok]) -> Option<Vec<String>> {
    let tokens = match tokens {
        [Tok::Ident(g), Tok::ColonColon, rest @ ..] if g == "global" => rest,
        all => all,
    };
    let mut names = Vec::new();
    for (i, tok) in tokens.iter().enumerate() {
        match (i % 2, tok) {
            (0, Tok::Ident(n) | Tok::VerbatimIdent(n)) => names.push(n.clone()),
            (1, Tok::Punct('.')) => {}
            _ => return None,
        }
    }
    (!names.is_empty() && tokens.len() % 2 == 1).then_some(names)
}

// ------------------------------- Tests ------------------------------------ //
