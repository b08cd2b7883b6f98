/*!
# Introduction to BASIC PRG

Type in a program with any text editor. Every line starts with a line
number, just as you would enter it at the `READY.` prompt.

```text
10 print "hello"
20 goto 10
```

Keywords are only recognized in upper case. Most editors on a modern
machine give you lower case, so ask for the case to be swapped.

<pre><code>&nbsp;> bas2prg -i -o hello.prg hello.bas
</code></pre>

The result loads and runs like anything saved from the real machine.
To go the other way, list the PRG file.

<pre><code>&nbsp;> prg2bas hello.prg
&nbsp;  10 PRINT "HELLO"
&nbsp;  20 GOTO 10
</code></pre>

Both tools read stdin and write stdout unless given file names, so they
can sit in a pipeline. Warnings go to stderr.

## Options for bas2prg

`-i` swaps upper and lower case on the whole line before anything else.

`-n` gives a line without a number the previous number plus one. Without
it such a line becomes line 0.

`-t` removes spaces at both ends of each line. `-c` removes all spaces
outside of strings and `REM` text, which saves memory.

`-a ADDR` sets the load address. The default is `$0801`, where a C64
expects BASIC. A C128 wants `$1C01`.

`-d basic7` uses the BASIC 7.0 keywords, including those that take two
bytes.

## Special characters

Bytes that have no printable form are written as two upper case hex
digits in braces. `{93}` is the C64 clear-screen code.

```text
10 PRINT "{93}READY FOR ANYTHING"
```

A brace followed by two hex digits must be closed. `bas2prg` stops with
`SYNTAX ERROR` when it is not and no PRG file is left behind.

## Exit status

| Code | Meaning |
|------|---------|
| 0 | Success |
| 1 | Bad command line |
| 2 | Can't open the input |
| 3 | Can't create the output |
| 4 | Conversion or I/O failed |

*/
