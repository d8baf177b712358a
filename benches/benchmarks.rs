// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use contrib_grid::{
    AvatarImage, Contributor, GridDocument, GridLayout, GridOptions, minify, page_plan,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn sample_contributors(count: usize,) -> Vec<Contributor,>
{
    (0..count)
        .map(|index| Contributor {
            name:       format!("contributor-{index}"),
            avatar_url: format!("https://avatars.githubusercontent.com/u/{index}?v=4"),
        },)
        .collect()
}

fn sample_document(count: usize,) -> GridDocument
{
    let layout = GridLayout::new(GridOptions::default(),);
    let contributors = sample_contributors(count,);
    let images = (0..count).map(|index| {
        if index % 10 == 0 {
            AvatarImage::Placeholder
        } else {
            AvatarImage::Embedded("data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAAB".to_owned(),)
        }
    },);
    GridDocument::assemble(&layout, &contributors, images,)
}

fn benchmark_grid_serialization(c: &mut Criterion,)
{
    let document = sample_document(100,);

    c.bench_function("serialize_grid_100", |b| b.iter(|| black_box(&document,).to_string(),),);
}

fn benchmark_minify(c: &mut Criterion,)
{
    let svg = sample_document(100,).to_string();

    c.bench_function("minify_grid_100", |b| b.iter(|| minify(black_box(&svg,),),),);
}

fn benchmark_page_plan(c: &mut Criterion,)
{
    c.bench_function("page_plan_1050", |b| b.iter(|| page_plan(black_box(1050,),),),);
}

criterion_group!(benches, benchmark_grid_serialization, benchmark_minify, benchmark_page_plan);
criterion_main!(benches);
