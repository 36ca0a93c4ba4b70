//! Dispatch caches against hand-written cascades.
//!
//! Run with: cargo bench -p caseswitch-dispatch --bench dispatch

use std::hint::black_box;

use caseswitch_dispatch::{NO_MATCH, StringDispatch, TypeDispatch};
use caseswitch_hierarchy::RuntimeType;
use criterion::{Criterion, criterion_group, criterion_main};

struct Lattice {
	small_cases: Vec<RuntimeType>,
	big_cases: Vec<RuntimeType>,
	data: Vec<RuntimeType>,
	/// `D, C, B, A` in small-case order, for the cascade baseline.
	small_order: [RuntimeType; 4],
}

fn lattice() -> Lattice {
	let object = RuntimeType::class("Object").build();
	let i = RuntimeType::interface("I").build();
	let j = RuntimeType::interface("J").build();
	let char_sequence = RuntimeType::interface("CharSequence").build();
	let comparable = RuntimeType::interface("Comparable").build();
	let class = |name: &str, ifaces: &[&RuntimeType]| {
		ifaces
			.iter()
			.fold(RuntimeType::class(name).extends(&object), |b, iface| b.implements(iface))
			.build()
	};
	let a = class("A", &[]);
	let b = class("B", &[&i]);
	let c = class("C", &[&j]);
	let d = class("D", &[&i, &j]);
	let e = class("E", &[&i]);
	let f = class("F", &[&j]);
	let string = class("String", &[&char_sequence, &comparable]);
	let builder = class("StringBuilder", &[&char_sequence]);
	let char_buffer = class("CharBuffer", &[&char_sequence, &comparable]);
	let uri = class("URI", &[&comparable]);
	let date = class("LocalDate", &[&comparable]);
	let anon_d = RuntimeType::class("D$1").extends(&d).build();
	let anon_a = RuntimeType::class("A$1").extends(&a).build();

	Lattice {
		small_cases: vec![d.clone(), c.clone(), b.clone(), a.clone()],
		big_cases: vec![
			d.clone(),
			c.clone(),
			b.clone(),
			a.clone(),
			j.clone(),
			i.clone(),
			string.clone(),
			builder.clone(),
			char_sequence,
			uri.clone(),
			date.clone(),
			comparable,
			object.clone(),
		],
		data: vec![
			d.clone(),
			e.clone(),
			c.clone(),
			a.clone(),
			f.clone(),
			b.clone(),
			a.clone(),
			e,
			f,
			anon_d,
			anon_a,
			string,
			builder,
			char_buffer,
			date,
			uri,
			object,
		],
		small_order: [d, c, b, a],
	}
}

fn cascade(order: &[RuntimeType], ty: &RuntimeType) -> i32 {
	for (i, case) in order.iter().enumerate() {
		if ty.is_subtype_of(case) {
			return i as i32;
		}
	}
	NO_MATCH
}

fn bench_type_dispatch(c: &mut Criterion) {
	let lattice = lattice();
	let small = TypeDispatch::create(true, &lattice.small_cases).unwrap();
	let big = TypeDispatch::create(true, &lattice.big_cases).unwrap();

	let mut group = c.benchmark_group("type_dispatch");
	group.bench_function("small_small_type_switch", |bench| {
		bench.iter(|| lattice.data[..4].iter().map(|ty| small.classify_type(black_box(ty))).sum::<i32>())
	});
	group.bench_function("small_big_type_switch", |bench| {
		bench.iter(|| lattice.data.iter().map(|ty| small.classify_type(black_box(ty))).sum::<i32>())
	});
	group.bench_function("big_big_type_switch", |bench| {
		bench.iter(|| lattice.data.iter().map(|ty| big.classify_type(black_box(ty))).sum::<i32>())
	});
	group.bench_function("small_big_subtype_cascade", |bench| {
		bench.iter(|| {
			lattice
				.data
				.iter()
				.map(|ty| cascade(&lattice.small_order, black_box(ty)))
				.sum::<i32>()
		})
	});
	group.bench_function("big_big_subtype_cascade", |bench| {
		bench.iter(|| {
			lattice
				.data
				.iter()
				.map(|ty| cascade(&lattice.big_cases, black_box(ty)))
				.sum::<i32>()
		})
	});
	group.finish();
}

const WORDS: [&str; 6] = ["bernie the dog", "zara the cat", "tweety", "nemo", "rex", "kitty"];

fn match_cascade(s: &str) -> i32 {
	match s {
		"bernie the dog" => 0,
		"zara the cat" => 1,
		"tweety" => 2,
		"nemo" => 3,
		_ => NO_MATCH,
	}
}

fn bench_string_dispatch(c: &mut Criterion) {
	let dispatch = StringDispatch::create(false, ["bernie the dog", "zara the cat", "tweety", "nemo"]).unwrap();
	let inputs: Vec<String> = WORDS.iter().map(|w| w.to_string()).collect();

	let mut group = c.benchmark_group("string_dispatch");
	group.bench_function("string_switch", |bench| {
		bench.iter(|| inputs.iter().map(|s| dispatch.classify_str(black_box(s))).sum::<i32>())
	});
	group.bench_function("match_cascade", |bench| {
		bench.iter(|| inputs.iter().map(|s| match_cascade(black_box(s))).sum::<i32>())
	});
	group.finish();
}

criterion_group!(benches, bench_type_dispatch, bench_string_dispatch);
criterion_main!(benches);
