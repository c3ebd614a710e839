use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use goinspect::{declarations, project_fields, type_string, Declaration};
use goinspect_parser::ast::Interner;
use goinspect_parser::{parse_source, Lexer};
use std::hint::black_box as bb;

// =============================================================================
// Test Corpus - Different sizes of Go code
// =============================================================================

const SMALL_SINGLE_FUNC: &str = r#"
package main

func main() {
    run(os.Args[1:])
}
"#;

const MEDIUM_GEOMETRY: &str = r#"
package shapes

type Vec2 struct {
    X, Y float64
}

type Polygon struct {
    Points []Vec2
    Closed bool
}

func (p Polygon) Len() int { return len(p.Points) }

func (p *Polygon) Push(v Vec2) {
    p.Points = append(p.Points, v)
}

func Centroid(ps ...Vec2) (c Vec2, ok bool) {
    if len(ps) == 0 {
        return Vec2{}, false
    }
    for _, v := range ps {
        c.X += v.X / float64(len(ps))
        c.Y += v.Y / float64(len(ps))
    }
    return c, true
}
"#;

const MODELS_WITH_TAGS: &str = r#"
package models

type User struct {
    ID      int64             `json:"id" db:"user_id"`
    Name    string            `json:"name,omitempty" xml:"Name"`
    Email   *string           `json:"email"`
    Roles   []string          `json:"roles"`
    Attrs   map[string]any
    Events  <-chan Event      `json:"-"`
    OnSave  func(u *User) error
    Visit   func(fn func(int) bool, limit int) (n int, err error)
}

type Event struct {
    Kind    string            `json:"kind"`
    Payload [16]byte          `json:"payload"`
    Next    *Event            `json:"next,omitempty"`
}

type Store interface {
    Get(id int64) (*User, error)
    Put(u *User) error
}
"#;

const LARGE_SERVICE: &str = r#"
package service

import (
    "context"
    "sync"
    "time"
)

type State uint8

const (
    Idle State = iota
    Running
    Draining
    Stopped
)

var (
    DefaultTimeout = 30 * time.Second
    ErrClosed      = errors.New("service closed")
)

type Handler[T any] interface {
    Handle(ctx context.Context, msg T) error
    Name() string
}

type Options struct {
    Workers   int           `json:"workers" yaml:"workers"`
    Timeout   time.Duration `json:"timeout,omitempty"`
    QueueSize int           `json:"queue_size"`
    OnError   func(error)   `json:"-"`
}

type Service[T any] struct {
    mu       sync.Mutex
    opts     Options
    handlers map[string]Handler[T]
    queue    chan T
    done     <-chan struct{}
    state    State
}

func New[T any](opts Options) *Service[T] {
    if opts.Workers <= 0 {
        opts.Workers = 1
    }
    return &Service[T]{
        opts:     opts,
        handlers: make(map[string]Handler[T]),
        queue:    make(chan T, opts.QueueSize),
    }
}

func (s *Service[T]) Register(h Handler[T]) {
    s.mu.Lock()
    defer s.mu.Unlock()
    s.handlers[h.Name()] = h
}

func (s *Service[T]) Run(ctx context.Context) error {
    s.state = Running
    var wg sync.WaitGroup
    for i := 0; i < s.opts.Workers; i++ {
        wg.Add(1)
        go func() {
            defer wg.Done()
            for msg := range s.queue {
                for _, h := range s.handlers {
                    if err := h.Handle(ctx, msg); err != nil && s.opts.OnError != nil {
                        s.opts.OnError(err)
                    }
                }
            }
        }()
    }
    <-ctx.Done()
    s.state = Draining
    close(s.queue)
    wg.Wait()
    s.state = Stopped
    return ctx.Err()
}

func (s *Service[T]) Submit(msg T) bool {
    select {
    case s.queue <- msg:
        return true
    default:
        return false
    }
}
"#;

// =============================================================================
// Helpers
// =============================================================================

fn corpora() -> [(&'static str, &'static str); 4] {
    [
        ("small", SMALL_SINGLE_FUNC),
        ("medium", MEDIUM_GEOMETRY),
        ("models", MODELS_WITH_TAGS),
        ("large", LARGE_SERVICE),
    ]
}

fn token_count(input: &str) -> usize {
    Lexer::new(input).count()
}

fn make_unique_names(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

// =============================================================================
// Benchmark 1: Lexer
// =============================================================================

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    for (name, input) in corpora() {
        group.throughput(Throughput::Elements(token_count(input) as u64));
        group.bench_with_input(BenchmarkId::new("tokens", name), &input, |b, &input| {
            b.iter(|| {
                let mut acc: u64 = 0;
                for (l, _, r) in Lexer::new(bb(input)) {
                    acc = acc.wrapping_add(l as u64).wrapping_add(r as u64);
                }
                bb(acc);
            });
        });
    }

    group.finish();
}

// =============================================================================
// Benchmark 2: Parse to declarations
// =============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (name, input) in corpora() {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_source", name), &input, |b, &input| {
            b.iter(|| {
                let file = parse_source(bb(input)).unwrap();
                bb(file.decls().len());
            });
        });
    }

    group.finish();
}

// =============================================================================
// Benchmark 3: Inventory over a parsed file
// - names: every declared name
// - members: every struct/interface member with its rendered type
// =============================================================================

fn bench_inventory(c: &mut Criterion) {
    let mut group = c.benchmark_group("inventory");

    for (name, input) in corpora() {
        let file = parse_source(input).unwrap();

        group.bench_with_input(BenchmarkId::new("names", name), &file, |b, file| {
            b.iter(|| {
                let mut n = 0usize;
                for decl in declarations(bb(file)) {
                    n += decl.names().len();
                }
                bb(n);
            });
        });

        group.bench_with_input(BenchmarkId::new("members", name), &file, |b, file| {
            b.iter(|| {
                let mut bytes = 0usize;
                for decl in declarations(bb(file)) {
                    let Declaration::Type { name, .. } = decl else {
                        continue;
                    };
                    for field in project_fields(file, &decl, name) {
                        bytes += type_string(&file.arena, field.type_expr).unwrap().len();
                        bytes += field.raw_tag.len();
                    }
                }
                bb(bytes);
            });
        });
    }

    group.finish();
}

// =============================================================================
// Benchmark 4: Interner scalability
// =============================================================================

fn bench_interner(c: &mut Criterion) {
    let mut group = c.benchmark_group("interner");

    for &n in &[100usize, 1000, 10000] {
        let names = make_unique_names("field", n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("unique", n), &names, |b, names| {
            b.iter(|| {
                let mut interner = Interner::new();
                for s in names {
                    bb(interner.intern(s.as_str()));
                }
                bb(interner);
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion registration
// =============================================================================

criterion_group!(benches, bench_lexer, bench_parse, bench_inventory, bench_interner);
criterion_main!(benches);
