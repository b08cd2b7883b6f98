/*!
# The PRG Format

A PRG file is a two byte load address followed by the bytes that go in
memory starting there. All words are little-endian.

For a BASIC program those bytes are a chain of line records.

```text
load address    2 bytes
  link          2 bytes, address of the next record, 0 ends the program
  line number   2 bytes
  tokens        1 or more bytes
  0             1 byte
  ...
0               2 bytes
```

The interpreter relinks the chain when it loads a program, so the link
mostly matters for finding the end. Lines are kept in whatever order
they appear. Nothing sorts them.

`10 PRINT "HI"` at `$0801` becomes:

```text
01 08  0C 08  0A 00  99 20 22 48 49 22 00  00 00
```

## Tokens

Keywords are crunched to one byte from `$80` up. `REM` is `$8F`; nothing
after it on the line is crunched. Nothing between quotes is crunched
either.

Matching runs through the table in code order and takes the first
keyword that starts the remaining text. That is why `GO TO` becomes
`GO` followed by `TO`.

BASIC 3.5 and 7.0 go past `$CB`. BASIC 7.0 also reserves `$CE` and `$FE`
as prefixes. The byte after a prefix picks a keyword from a second table,
so `XOR` is `CE 08` and `SLOW` is `FE 26`.

*/
