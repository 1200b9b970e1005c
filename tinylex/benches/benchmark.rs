use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tinylex::lexer::compile;
use tinylex::regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Id,
    Num,
    Ws,
    Plus,
}

fn demo_spec() -> [(Token, &'static str); 4] {
    [
        (Token::Id, "([a-z]|[A-Z])+"),
        (Token::Num, "[0-9]+"),
        (Token::Ws, "(\\ |\n)+"),
        (Token::Plus, r"\+"),
    ]
}

pub fn regex_parse(c: &mut Criterion) {
    c.bench_function("regex parse", |b| {
        b.iter(|| Regex::parse(black_box("a(b|c)*d+eps?[0-9][a-z][A-Z]")).unwrap())
    });
}

pub fn thompson_construction(c: &mut Criterion) {
    let tree = Regex::parse("a(b|c)*d+eps?[0-9][a-z][A-Z]").unwrap();
    c.bench_function("thompson construction", |b| {
        b.iter(|| black_box(&tree).thompson(0))
    });
}

pub fn subset_construction(c: &mut Criterion) {
    let nfa = Regex::parse("(a|b|c|d)*abcd").unwrap().thompson(0);
    c.bench_function("subset construction", |b| b.iter(|| black_box(&nfa).to_dfa()));
}

pub fn lexer_compile(c: &mut Criterion) {
    let spec = demo_spec();
    c.bench_function("lexer compile", |b| b.iter(|| compile(black_box(&spec)).unwrap()));
}

pub fn lex_throughput(c: &mut Criterion) {
    let spec = demo_spec();
    let lexer = compile(&spec).unwrap();
    let input = "foo bar 123 + baz 456 + qux".repeat(20);
    c.bench_function("lex", |b| b.iter(|| lexer.lex(black_box(&input)).unwrap()));
}

criterion_group!(
    benches,
    regex_parse,
    thompson_construction,
    subset_construction,
    lexer_compile,
    lex_throughput
);
criterion_main!(benches);
