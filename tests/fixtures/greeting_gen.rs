// Autogenerated by erbgen from greeting.rs. Do not edit.
#![allow(non_snake_case, redundant_semicolons, unused_imports, unused_mut, unused_variables)]

use super::*;

pub fn WriteLayout(writer: &mut dyn Write, model: &Model) -> io::Result<()> {
let mut __erb_result: ::std::io::Result<()> = ::std::result::Result::Ok(());
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_all(&mut *writer, "<h1>".as_bytes()); }
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_fmt(&mut *writer, ::std::format_args!("{}", ::erbgen::escape::html(&(model.title)))); }
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_all(&mut *writer, "</h1>\n<ul>".as_bytes()); }
for item in &model.items {;
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_all(&mut *writer, "\n  <li>".as_bytes()); }
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_fmt(&mut *writer, ::std::format_args!("{}", ::erbgen::escape::html(&(item)))); }
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_all(&mut *writer, "</li>".as_bytes()); }
};
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_all(&mut *writer, "\n</ul>\n<a href=\"/search?q=".as_bytes()); }
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_fmt(&mut *writer, ::std::format_args!("{}", ::erbgen::escape::url(&(model.query)))); }
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_all(&mut *writer, "\">".as_bytes()); }
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_fmt(&mut *writer, ::std::format_args!("{}", (model.footer))); }
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_all(&mut *writer, "</a>\n".as_bytes()); }
__erb_result.map_err(::std::convert::Into::into)
}

pub fn WriteTrio(writer: &mut dyn Write, first: &str, ticks: &Cell<u32>) -> io::Result<()> {
let mut __erb_result: ::std::io::Result<()> = ::std::result::Result::Ok(());
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_all(&mut *writer, "one".as_bytes()); }
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_fmt(&mut *writer, ::std::format_args!("{}", (first))); }
ticks.set(ticks.get() + 1);
if __erb_result.is_ok() { __erb_result = ::std::io::Write::write_all(&mut *writer, "three".as_bytes()); }
__erb_result.map_err(::std::convert::Into::into)
}
